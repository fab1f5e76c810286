//! 写真アップロード画面（1枚目は単語リストを置き換える）

use circle_grid_common::Session;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

use crate::app::{analyze_photo_file, apply};
use crate::browser;

#[component]
pub fn PhotoUpload(session: RwSignal<Session>) -> impl IntoView {
    let preview = move || session.with(|s| s.photo_preview().map(str::to_string));
    let is_analyzing = move || session.with(|s| s.is_analyzing());

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = browser::take_selected_file(&input) {
            analyze_photo_file(session, file);
        }
    };

    view! {
        <section class="panel">
            <button
                class="btn btn-link"
                disabled=is_analyzing
                on:click=move |_| apply(session, |s| s.back_to_landing())
            >
                "← Back"
            </button>
            <h2>"Take or Upload Photo"</h2>

            {move || match preview() {
                Some(src) => view! {
                    <div class="preview">
                        <img src=src alt="Preview" />
                        <Show when=is_analyzing>
                            <div class="spinner"></div>
                            <p class="text-muted">"Analyzing with AI..."</p>
                        </Show>
                    </div>
                }.into_any(),
                None => view! {
                    <label class="upload-area">
                        <div class="upload-icon">"📷"</div>
                        <p><strong>"Take Photo"</strong></p>
                        <p class="text-muted">"Use camera"</p>
                        <input type="file" class="hidden" accept="image/*" capture="environment" on:change=on_change />
                    </label>
                    <label class="upload-area">
                        <div class="upload-icon">"🖼"</div>
                        <p><strong>"Upload Photo"</strong></p>
                        <p class="text-muted">"JPG, PNG, WebP (max 5MB)"</p>
                        <input type="file" class="hidden" accept="image/*" on:change=on_change />
                    </label>
                }.into_any(),
            }}
        </section>
    }
}

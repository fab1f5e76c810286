//! レビュー・編集画面
//!
//! 「Add Photo」で選んだ写真は既存リストにマージされる（タイトルはそのまま）。

use circle_grid_common::Session;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

use crate::app::{analyze_photo_file, apply};
use crate::browser;

#[component]
pub fn EditWords(session: RwSignal<Session>) -> impl IntoView {
    let is_analyzing = move || session.with(|s| s.is_analyzing());
    let word_count = move || session.with(|s| s.words().len());
    let title = move || session.with(|s| s.title().to_string());

    let on_add_photo = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = browser::take_selected_file(&input) {
            analyze_photo_file(session, file);
        }
    };

    view! {
        <section class="panel">
            <h2>"Review & Edit Words"</h2>
            <Show when=move || !is_analyzing()>
                <p class="text-muted">
                    {move || format!("{} words • Edit, add, or remove as needed", word_count())}
                </p>
            </Show>

            <label class="field">
                <span>"Title (optional)"</span>
                <input
                    type="text"
                    placeholder="e.g. 形容詞篇, 動物篇"
                    prop:value=title
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        apply(session, |s| s.set_title(value));
                    }
                />
            </label>

            <Show when=is_analyzing>
                <div class="analyzing">
                    <div class="spinner"></div>
                    <p>"Analyzing additional photo..."</p>
                </div>
            </Show>

            <div class="words-header">
                <h3>"Words"</h3>
                <span class="text-muted">{move || format!("{} total", word_count())}</span>
            </div>

            // 行は位置で識別する（入力中に再生成されないように）
            <div class="word-list">
                <For
                    each=move || 0..word_count()
                    key=|index| *index
                    children=move |index| view! { <WordRow session=session index=index /> }
                />
            </div>

            <div class="actions">
                <button class="btn btn-secondary" on:click=move |_| apply(session, |s| s.add_word())>
                    "+ Add Word"
                </button>
                <label class=move || if is_analyzing() { "btn btn-secondary disabled" } else { "btn btn-secondary" }>
                    "📷 Add Photo"
                    <input
                        type="file"
                        class="hidden"
                        accept="image/*"
                        capture="environment"
                        disabled=is_analyzing
                        on:change=on_add_photo
                    />
                </label>
                <button
                    class="btn btn-secondary"
                    disabled=is_analyzing
                    on:click=move |_| apply(session, |s| s.cancel_review())
                >
                    "Cancel"
                </button>
                <button
                    class="btn btn-primary"
                    disabled=is_analyzing
                    on:click=move |_| apply(session, |s| s.generate_grid())
                >
                    "Generate Grid →"
                </button>
            </div>
        </section>
    }
}

#[component]
fn WordRow(session: RwSignal<Session>, index: usize) -> impl IntoView {
    let value = move || session.with(|s| s.words().get(index).cloned().unwrap_or_default());

    view! {
        <div class="word-row">
            <input
                type="text"
                placeholder="詞語"
                prop:value=value
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    apply(session, |s| s.edit_word(index, text));
                }
            />
            <button
                class="btn btn-icon"
                title="Remove"
                on:click=move |_| apply(session, |s| s.remove_word(index))
            >
                "✕"
            </button>
        </div>
    }
}

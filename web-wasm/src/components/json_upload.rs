//! JSONファイルの読み込み画面
//!
//! 読み込みに成功するとレビューを飛ばして直接グリッドへ進む。

use circle_grid_common::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::app::apply;
use crate::browser;

const EXAMPLE: &str = r#"["詞語1", "詞語2"]
or
{
  "title": "動物篇",
  "words": ["詞語1", "詞語2"]
}"#;

#[component]
pub fn JsonUpload(session: RwSignal<Session>) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = browser::take_selected_file(&input) else {
            return;
        };

        spawn_local(async move {
            match browser::read_text(file).await {
                Ok(text) => apply(session, |s| s.import_json(&text)),
                Err(e) => {
                    gloo::console::error!(format!("json read failed: {}", e));
                    browser::alert("Error parsing JSON file. Please check the file format.");
                }
            }
        });
    };

    view! {
        <section class="panel">
            <button class="btn btn-link" on:click=move |_| apply(session, |s| s.back_to_landing())>
                "← Back"
            </button>
            <h2>"Upload JSON File"</h2>

            <label class="upload-area">
                <div class="upload-icon">"⬆"</div>
                <p><strong>"Click to upload"</strong></p>
                <p class="text-muted">"JSON file with word array"</p>
                <input type="file" class="hidden" accept=".json,application/json" on:change=on_change />
            </label>

            <div class="example">
                <p><strong>"Expected format:"</strong></p>
                <pre>{EXAMPLE}</pre>
            </div>
        </section>
    }
}

//! 印刷用グリッド画面
//!
//! 操作ボタンは印刷時に隠す（`no-print`）。

use circle_grid_common::{GridLayout, Session, GRID_COLUMNS};
use leptos::prelude::*;

use crate::app::apply;
use crate::browser;

const DEFAULT_FILE_NAME: &str = "word-grid";

#[component]
pub fn WordGrid(session: RwSignal<Session>) -> impl IntoView {
    let layout = move || session.with(|s| GridLayout::from_draft(s.draft()));

    let on_download = move |_| {
        let (json, stem) = session.with(|s| {
            let title = s.title().trim();
            let stem = if title.is_empty() { DEFAULT_FILE_NAME.to_string() } else { title.to_string() };
            (s.draft().to_json(), stem)
        });
        let file_name = format!("{}.json", stem);
        if let Err(e) = browser::download_text(&file_name, "application/json", &json) {
            gloo::console::error!(format!("download failed: {}", e));
        }
    };

    view! {
        <section class="grid-page">
            <div class="actions no-print">
                <span class="text-muted">{move || format!("{} words", layout().cell_count())}</span>
                <button class="btn btn-secondary" on:click=move |_| session.update(|s| s.reset())>
                    "Start Over"
                </button>
                <button class="btn btn-secondary" on:click=move |_| apply(session, |s| s.edit_grid())>
                    "Edit Words"
                </button>
                <button class="btn btn-secondary" on:click=on_download>
                    "Download JSON"
                </button>
                <button class="btn btn-primary" on:click=move |_| browser::print_page()>
                    "Print"
                </button>
            </div>

            {move || layout().heading.map(|heading| view! { <h1 class="grid-title">{heading}</h1> })}

            <div
                class="word-grid"
                style=format!("grid-template-columns: repeat({}, minmax(0, 1fr));", GRID_COLUMNS)
            >
                {move || {
                    let layout = layout();
                    layout
                        .cells()
                        .map(|word| view! { <div class="cell"><span>{word.to_string()}</span></div> })
                        .collect_view()
                }}
            </div>
        </section>
    }
}

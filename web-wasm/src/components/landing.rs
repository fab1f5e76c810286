//! 入力方法の選択画面

use circle_grid_common::{Session, UploadMode};
use leptos::prelude::*;

use crate::app::apply;

#[component]
pub fn Landing(session: RwSignal<Session>) -> impl IntoView {
    view! {
        <div class="choice-grid">
            <button
                class="choice"
                on:click=move |_| apply(session, |s| s.choose_mode(UploadMode::Photo))
            >
                <div class="choice-icon">"📷"</div>
                <h3>"Take/Upload Photo"</h3>
                <p class="text-muted">"AI will extract words from worksheet"</p>
            </button>

            <button
                class="choice"
                on:click=move |_| apply(session, |s| s.choose_mode(UploadMode::Json))
            >
                <div class="choice-icon">"📄"</div>
                <h3>"Upload JSON File"</h3>
                <p class="text-muted">"Manual word list from JSON file"</p>
            </button>
        </div>
    }
}

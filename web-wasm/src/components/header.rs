//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header no-print">
            <h1>"Circle Game"</h1>
            <p class="text-muted">"Create a printable Chinese word grid for the circle game"</p>
        </header>
    }
}

//! メインアプリケーションコンポーネント
//!
//! 状態は `Session` 1つにまとめ、画面はその `screen()` から決まる。

use circle_grid_common::{Screen, Session, SessionError};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::gateway;
use crate::browser;
use crate::components::{
    edit_words::EditWords, header::Header, json_upload::JsonUpload, landing::Landing,
    photo_upload::PhotoUpload, word_grid::WordGrid,
};

/// セッション操作を適用し、失敗したら通知する
pub fn apply<F>(session: RwSignal<Session>, action: F)
where
    F: FnOnce(&mut Session) -> Result<(), SessionError>,
{
    if let Some(Err(err)) = session.try_update(action) {
        notify(&err);
    }
}

/// 利用者向けのエラーは alert、画面と合わない操作はコンソールのみ
pub fn notify(err: &SessionError) {
    match err {
        SessionError::InvalidTransition { .. } => {
            gloo::console::warn!(err.to_string());
        }
        _ => browser::alert(&err.to_string()),
    }
}

/// 写真を検証・読み込みしてゲートウェイへ送る
///
/// アップロード画面なら置換、レビュー画面ならマージになる。
pub fn analyze_photo_file(session: RwSignal<Session>, file: web_sys::File) {
    if let Err(err) = Session::validate_photo(&file.type_(), file.size() as u64) {
        notify(&err);
        return;
    }

    spawn_local(async move {
        let data_uri = match browser::read_data_url(file).await {
            Ok(uri) => uri,
            Err(e) => {
                gloo::console::error!(format!("photo read failed: {}", e));
                browser::alert("Please select an image file");
                return;
            }
        };

        let started = session.try_update(|s| s.begin_photo_analysis(data_uri.clone()));
        match started {
            Some(Ok(_)) => {}
            Some(Err(err)) => return notify(&err),
            None => return,
        }

        match gateway::analyze_photo(&data_uri).await {
            Ok(result) => {
                // リセット後に届いた結果は捨てる
                if let Some(Err(err)) = session.try_update(|s| s.complete_photo_analysis(&result)) {
                    gloo::console::warn!(format!("discarded late result: {}", err));
                }
            }
            Err(detail) => {
                gloo::console::error!(format!("analyze-photo failed: {}", detail));
                let err = session.try_update(|s| {
                    s.is_analyzing().then(|| s.fail_photo_analysis(detail))
                });
                if let Some(Some(err)) = err {
                    notify(&err);
                }
            }
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::new());
    let screen = Memo::new(move |_| session.with(|s| s.screen()));

    view! {
        <div class="container">
            <Show when=move || screen.get() != Screen::Grid>
                <Header />
            </Show>

            {move || match screen.get() {
                Screen::Landing => view! { <Landing session=session /> }.into_any(),
                Screen::JsonUpload => view! { <JsonUpload session=session /> }.into_any(),
                Screen::PhotoUpload => view! { <PhotoUpload session=session /> }.into_any(),
                Screen::ReviewEdit => view! { <EditWords session=session /> }.into_any(),
                Screen::Grid => view! { <WordGrid session=session /> }.into_any(),
            }}
        </div>
    }
}

//! ブラウザ機能の薄いラッパー（ファイル読み込み・通知・印刷・ダウンロード）

use gloo::file::{Blob, File, ObjectUrl};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

/// 選択された最初のファイル。次回も同じファイルを選べるよう入力はクリアする
pub fn take_selected_file(input: &HtmlInputElement) -> Option<web_sys::File> {
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

pub async fn read_text(file: impl Into<File>) -> Result<String, String> {
    let file: File = file.into();
    gloo::file::futures::read_as_text(&file)
        .await
        .map_err(|e| e.to_string())
}

pub async fn read_data_url(file: impl Into<File>) -> Result<String, String> {
    let file: File = file.into();
    gloo::file::futures::read_as_data_url(&file)
        .await
        .map_err(|e| e.to_string())
}

pub fn alert(message: &str) {
    gloo::dialogs::alert(message);
}

pub fn print_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.print() {
            gloo::console::error!(format!("print failed: {:?}", e));
        }
    }
}

/// ダウンロード開始後に Object URL を破棄するまでの猶予
const REVOKE_DELAY_MS: u32 = 10_000;

/// 文字列をファイルとして保存させる
pub fn download_text(file_name: &str, mime_type: &str, content: &str) -> Result<(), String> {
    let blob = Blob::new_with_options(content, Some(mime_type));
    let url = ObjectUrl::from(blob);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document がありません")?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "a要素を作成できません".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // click() 直後に revoke するとダウンロードが中断されるブラウザがある
    Timeout::new(REVOKE_DELAY_MS, move || drop(url)).forget();
    Ok(())
}

//! 抽出ゲートウェイ呼び出し
//!
//! 同一オリジンの `POST /api/analyze-photo` にData URIを送る。
//! APIキーはサーバー側だけが持つ。

use circle_grid_common::ExtractionResult;
use gloo::net::http::Request;
use serde::{Deserialize, Serialize};

const ANALYZE_ENDPOINT: &str = "/api/analyze-photo";

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    image: &'a str,
}

/// ゲートウェイのエラーボディ
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    kind: Option<String>,
}

/// 写真1枚を解析する。失敗時はログ用の説明を返す
pub async fn analyze_photo(data_uri: &str) -> Result<ExtractionResult, String> {
    let response = Request::post(ANALYZE_ENDPOINT)
        .json(&AnalyzeRequest { image: data_uri })
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    let text = response.text().await.map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(describe_failure(status, &text));
    }

    serde_json::from_str::<ExtractionResult>(&text)
        .map_err(|e| format!("unexpected response body: {}", e))
}

fn describe_failure(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error, kind: Some(kind) }) => format!("{} {}: {}", status, kind, error),
        Ok(ErrorBody { error, kind: None }) => format!("{}: {}", status, error),
        Err(_) => format!("HTTP {}", status),
    }
}

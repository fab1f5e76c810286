//! HTTPハンドラ

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::error::GatewayError;
use super::extract::extract;
use crate::server::AppState;
use circle_grid_common::{ExtractionResult, PROMPT_VERSION};

/// POST /api/analyze-photo
///
/// ボディは Content-Type に関係なくJSONとして読む。
/// 上限超過は 413、JSONとして読めないボディは画像なし扱い。
pub async fn analyze_photo(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ExtractionResult>, GatewayError> {
    let body = body.map_err(|rejection| {
        warn!(%rejection, "request body rejected");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge
        } else {
            GatewayError::MissingInput
        }
    })?;

    let image = image_field(&body)?;
    let result = extract(state.model.as_ref(), &state.config, image.as_deref()).await?;
    Ok(Json(result))
}

/// `image` を取り出す。無い・null なら None、文字列以外は形式エラー
fn image_field(body: &[u8]) -> Result<Option<String>, GatewayError> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "request body is not JSON");
            return Ok(None);
        }
    };

    match value.get("image") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(image)) => Ok(Some(image.clone())),
        Some(_) => Err(GatewayError::InvalidFormat("image must be a string".into())),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub prompt_version: String,
    /// 3つの設定値が揃っているか
    pub configured: bool,
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "circle-grid".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        prompt_version: PROMPT_VERSION.to_string(),
        configured: state.config.is_configured(),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
    })
}

//! ゲートウェイのエラー種別
//!
//! どのエラーもそのリクエストで終わり（再試行しない）。
//! HTTPでは `{ "error": メッセージ, "kind": 種別 }` で返す。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::MissingSettings;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No image provided")]
    MissingInput,

    #[error("Invalid image format. Must be base64 encoded image. ({0})")]
    InvalidFormat(String),

    #[error("Request body is too large")]
    PayloadTooLarge,

    #[error("Server configuration error - missing environment variables")]
    Misconfigured(MissingSettings),

    #[error("Model call failed: {0}")]
    Upstream(String),

    #[error("Unexpected response type from AI")]
    UnexpectedModelOutput,

    #[error("Failed to extract data from image: {0}")]
    ExtractionFailed(String),

    #[error("Invalid response format from AI: {0}")]
    InvalidModelResponse(String),

    #[error("Failed to analyze photo: {0}")]
    Internal(String),
}

impl GatewayError {
    /// 機械可読な種別名
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingInput => "missing_input",
            GatewayError::InvalidFormat(_) => "invalid_format",
            GatewayError::PayloadTooLarge => "payload_too_large",
            GatewayError::Misconfigured(_) => "misconfigured",
            GatewayError::Upstream(_) => "upstream_failure",
            GatewayError::UnexpectedModelOutput => "unexpected_model_output",
            GatewayError::ExtractionFailed(_) => "extraction_failed",
            GatewayError::InvalidModelResponse(_) => "invalid_model_response",
            GatewayError::Internal(_) => "internal_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingInput | GatewayError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// クライアントに返すメッセージ。上流の詳細はログにだけ残す
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::MissingInput
            | GatewayError::InvalidFormat(_)
            | GatewayError::PayloadTooLarge
            | GatewayError::Misconfigured(_)
            | GatewayError::UnexpectedModelOutput => self.to_string(),
            GatewayError::ExtractionFailed(_) => "Failed to extract data from image".into(),
            GatewayError::InvalidModelResponse(_) => "Invalid response format from AI".into(),
            GatewayError::Upstream(_) | GatewayError::Internal(_) => "Failed to analyze photo".into(),
        }
    }
}

impl From<circle_grid_common::Error> for GatewayError {
    fn from(err: circle_grid_common::Error) -> Self {
        use circle_grid_common::Error as E;
        match err {
            E::InvalidFormat(msg) => GatewayError::InvalidFormat(msg),
            E::ExtractionFailed(msg) => GatewayError::ExtractionFailed(msg),
            E::InvalidModelResponse(msg) => GatewayError::InvalidModelResponse(msg),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.public_message(),
            "kind": self.kind(),
        }));
        (self.status(), body).into_response()
    }
}

//! 抽出ゲートウェイ
//!
//! `POST /api/analyze-photo` の処理一式:
//! - extract: 入力検証からモデル応答のパースまで
//! - model / anthropic: モデル呼び出しの抽象と実装
//! - handler: axum ハンドラ

pub mod anthropic;
pub mod error;
pub mod extract;
pub mod handler;
pub mod model;

pub use anthropic::AnthropicClient;
pub use error::GatewayError;
pub use extract::extract;
pub use model::{ContentBlock, ModelCallError, ModelReply, VisionModel, VisionRequest};

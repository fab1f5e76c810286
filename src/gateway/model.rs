//! 画像対応モデルの抽象
//!
//! 1回の呼び出しで「画像 + 固定プロンプト」を送り、応答のコンテンツ列と
//! トークン集計を受け取る。テストではモックに差し替える。

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::GatewayCredentials;
use circle_grid_common::ImageDataUri;

/// モデルへの入力
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub media_type: &'static str,
    /// base64本体
    pub data: String,
    pub prompt: &'static str,
}

impl VisionRequest {
    pub fn new(image: &ImageDataUri, prompt: &'static str) -> Self {
        Self {
            media_type: image.media_type(),
            data: image.data.clone(),
            prompt,
        }
    }
}

/// 応答のコンテンツブロック（text 以外は中身を見ない）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelReply {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: serde_json::Value,
}

impl ModelReply {
    /// 最初のブロックがテキストならその文字列
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => Some(text),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ModelCallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
}

#[async_trait]
pub trait VisionModel: Send + Sync {
    /// モデル識別子（ログ用）
    fn model_id(&self) -> &str;

    async fn complete(
        &self,
        credentials: &GatewayCredentials,
        request: &VisionRequest,
    ) -> Result<ModelReply, ModelCallError>;
}

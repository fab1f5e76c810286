//! Anthropic Messages API クライアント
//!
//! Cloudflare AI Gateway のルート経由で `/v1/messages` を1回だけ呼ぶ。

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use super::model::{ModelCallError, ModelReply, VisionModel, VisionRequest};
use crate::config::{Config, GatewayCredentials};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages APIリクエスト
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<Block<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: &'a str,
}

fn build_request<'a>(model: &'a str, max_tokens: u32, request: &'a VisionRequest) -> MessagesRequest<'a> {
    MessagesRequest {
        model,
        max_tokens,
        messages: vec![Message {
            role: "user",
            content: vec![
                Block::Image {
                    source: ImageSource {
                        kind: "base64",
                        media_type: request.media_type,
                        data: &request.data,
                    },
                },
                Block::Text { text: request.prompt },
            ],
        }],
    }
}

pub struct AnthropicClient {
    http: reqwest::Client,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(config: &Config) -> Result<Self, ModelCallError> {
        let mut builder = reqwest::Client::builder();
        // 0 はタイムアウトなし
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        Ok(Self {
            http: builder.build()?,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl VisionModel for AnthropicClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        credentials: &GatewayCredentials,
        request: &VisionRequest,
    ) -> Result<ModelReply, ModelCallError> {
        let url = format!("{}/v1/messages", credentials.base_url());
        let body = build_request(&self.model, self.max_tokens, request);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &credentials.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelCallError::Status { status, body });
        }

        Ok(response.json::<ModelReply>().await?)
    }
}

//! 抽出処理本体
//!
//! 入力検証 → 設定確認 → モデル呼び出し（1回） → 応答パース の順。
//! 設定確認までに失敗した場合は外部呼び出しを行わない。

use tracing::{debug, error, info, warn};

use super::error::GatewayError;
use super::model::{VisionModel, VisionRequest};
use crate::config::Config;
use circle_grid_common::{parse_data_uri, parse_worksheet_reply, ExtractionResult, WORKSHEET_PROMPT};

pub async fn extract(
    model: &dyn VisionModel,
    config: &Config,
    image: Option<&str>,
) -> Result<ExtractionResult, GatewayError> {
    let image = image
        .filter(|s| !s.is_empty())
        .ok_or(GatewayError::MissingInput)?;

    let image = parse_data_uri(image).map_err(|e| {
        warn!(error = %e, "rejected image payload");
        GatewayError::from(e)
    })?;

    let credentials = config.credentials().map_err(|missing| {
        error!(
            has_api_key = missing.has_api_key,
            has_account_id = missing.has_account_id,
            has_gateway = missing.has_gateway,
            "Missing environment variables"
        );
        GatewayError::Misconfigured(missing)
    })?;

    info!(
        media_type = image.media_type(),
        bytes = image.decoded_len(),
        model = model.model_id(),
        "analyzing worksheet photo"
    );

    let request = VisionRequest::new(&image, WORKSHEET_PROMPT);
    let reply = model.complete(&credentials, &request).await.map_err(|e| {
        error!(error = %e, "model call failed");
        GatewayError::Upstream(e.to_string())
    })?;

    let text = reply.first_text().ok_or_else(|| {
        error!("first content block is not text");
        GatewayError::UnexpectedModelOutput
    })?;

    let parsed = parse_worksheet_reply(text).map_err(|e| {
        error!(error = %e, "could not parse model reply");
        GatewayError::from(e)
    })?;

    debug!(title = %parsed.title, words = parsed.words.len(), "worksheet extracted");

    Ok(ExtractionResult {
        title: parsed.title,
        words: parsed.words,
        usage: reply.usage,
    })
}

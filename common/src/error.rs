//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// Data URIが受理できる画像形式でない
    #[error("Invalid image format: {0}")]
    InvalidFormat(String),

    /// モデル応答からJSONオブジェクトを取り出せない
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// JSONは取れたが {title, words} の形になっていない
    #[error("Invalid model response: {0}")]
    InvalidModelResponse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_format() {
        let error = Error::InvalidFormat("data:text/plain".to_string());
        assert_eq!(format!("{}", error), "Invalid image format: data:text/plain");
    }

    #[test]
    fn test_error_display_model_response() {
        let error = Error::InvalidModelResponse("words が配列ではありません".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid model response: words が配列ではありません"
        );
    }
}

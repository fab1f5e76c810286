use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum CircleGridError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("画像サイズが上限(5MB)を超えています: {0}")]
    ImageTooLarge(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("単語リストの読み込みに失敗: {0}")]
    Import(#[from] circle_grid_common::ImportError),

    #[error("抽出エラー: {0}")]
    Extraction(#[from] GatewayError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CircleGridError>;

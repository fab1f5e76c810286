//! ワークシートの型定義
//!
//! CLI・ゲートウェイ・Web(WASM)で共有される型:
//! - WorksheetDraft: 編集中のタイトルと単語リスト
//! - ExtractionResult: ゲートウェイ1回分の抽出結果
//! - UploadMode: 入力方法（JSON / 写真）

use serde::{Deserialize, Serialize};

/// 編集中のワークシート
///
/// 単語は表示順で保持する。重複の排除はマージ時のみで、
/// 手入力中の重複・空欄はそのまま許容する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub words: Vec<String>,
}

/// ゲートウェイの抽出結果
///
/// `usage` はモデル提供元のトークン集計をそのまま通す
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub title: String,
    pub words: Vec<String>,
    #[serde(default)]
    pub usage: serde_json::Value,
}

/// 入力方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    Json,
    Photo,
}

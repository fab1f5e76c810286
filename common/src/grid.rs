//! 印刷用グリッドのレイアウト
//!
//! 単語を現在の順番のまま5列に並べる。重複チェックはしない（表示専用）。

use crate::types::WorksheetDraft;

/// 1行あたりのセル数
pub const GRID_COLUMNS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    /// タイトルが空なら None（見出しを出さない）
    pub heading: Option<String>,
    pub rows: Vec<Vec<String>>,
}

impl GridLayout {
    pub fn from_draft(draft: &WorksheetDraft) -> Self {
        let heading = if draft.title.is_empty() {
            None
        } else {
            Some(draft.title.clone())
        };
        let rows = draft
            .words
            .chunks(GRID_COLUMNS)
            .map(|chunk| chunk.to_vec())
            .collect();
        Self { heading, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// 全セルを順番に
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

//! ワークシート編集操作
//!
//! 置換・マージ・位置指定の編集/削除と、JSONへの書き出し

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{ExtractionResult, WorksheetDraft};

/// 編集操作のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("word index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl WorksheetDraft {
    pub fn new(title: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            title: title.into(),
            words,
        }
    }

    /// 抽出結果でタイトルと単語をまるごと置き換える
    pub fn replace_with(&mut self, result: &ExtractionResult) {
        self.title = result.title.clone();
        self.words = result.words.clone();
    }

    /// 既存にない単語だけを末尾に追加（完全一致・大文字小文字区別）
    ///
    /// タイトルは変更しない。追加した件数を返す。
    pub fn merge_words(&mut self, incoming: &[String]) -> usize {
        let mut existing: HashSet<String> = self.words.iter().cloned().collect();
        let before = self.words.len();
        for word in incoming {
            if existing.insert(word.clone()) {
                self.words.push(word.clone());
            }
        }
        self.words.len() - before
    }

    pub fn edit_word(&mut self, index: usize, value: impl Into<String>) -> Result<(), DraftError> {
        let len = self.words.len();
        let slot = self
            .words
            .get_mut(index)
            .ok_or(DraftError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    /// 空欄を1つ追加
    pub fn add_blank_word(&mut self) {
        self.words.push(String::new());
    }

    /// 指定位置を削除し、後ろの単語を1つ前に詰める
    pub fn remove_word(&mut self, index: usize) -> Result<String, DraftError> {
        if index >= self.words.len() {
            return Err(DraftError::IndexOutOfRange {
                index,
                len: self.words.len(),
            });
        }
        Ok(self.words.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `{title, words}` 形式のJSONに書き出す
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_replace_with() {
        let mut draft = WorksheetDraft::new("舊", words(&["a"]));
        let result = ExtractionResult {
            title: "動物篇".into(),
            words: words(&["狗", "貓"]),
            usage: serde_json::Value::Null,
        };
        draft.replace_with(&result);
        assert_eq!(draft.title, "動物篇");
        assert_eq!(draft.words, words(&["狗", "貓"]));
    }

    #[test]
    fn test_merge_appends_only_new_words() {
        let mut draft = WorksheetDraft::new("T", words(&["狗", "貓"]));
        let added = draft.merge_words(&words(&["貓", "魚", "鳥", "魚"]));
        assert_eq!(added, 2);
        assert_eq!(draft.words, words(&["狗", "貓", "魚", "鳥"]));
        assert_eq!(draft.title, "T");
    }

    #[test]
    fn test_merge_subset_is_idempotent() {
        let mut draft = WorksheetDraft::new("T", words(&["a", "b", "c"]));
        let added = draft.merge_words(&words(&["c", "a"]));
        assert_eq!(added, 0);
        assert_eq!(draft.words, words(&["a", "b", "c"]));
    }

    #[test]
    fn test_merge_is_case_sensitive() {
        let mut draft = WorksheetDraft::new("", words(&["Cat"]));
        draft.merge_words(&words(&["cat"]));
        assert_eq!(draft.words, words(&["Cat", "cat"]));
    }

    #[test]
    fn test_remove_shifts_following_words() {
        let mut draft = WorksheetDraft::new("", words(&["a", "b", "c", "d"]));
        let removed = draft.remove_word(1).unwrap();
        assert_eq!(removed, "b");
        assert_eq!(draft.words, words(&["a", "c", "d"]));
    }

    #[test]
    fn test_remove_out_of_range_keeps_draft() {
        let mut draft = WorksheetDraft::new("", words(&["a"]));
        let err = draft.remove_word(3).unwrap_err();
        assert_eq!(err, DraftError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(draft.words, words(&["a"]));
    }

    #[test]
    fn test_edit_and_add_blank() {
        let mut draft = WorksheetDraft::new("", words(&["a", "b"]));
        draft.edit_word(0, "z").unwrap();
        draft.add_blank_word();
        assert_eq!(draft.words, words(&["z", "b", ""]));
        assert!(draft.edit_word(5, "x").is_err());
    }

    #[test]
    fn test_to_json_contains_fields() {
        let draft = WorksheetDraft::new("動物篇", words(&["狗"]));
        let json = draft.to_json();
        assert!(json.contains("\"title\": \"動物篇\""));
        assert!(json.contains("\"狗\""));
    }
}

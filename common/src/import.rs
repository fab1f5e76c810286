//! 単語リストJSONの読み込み
//!
//! 受理する形式:
//! - `["詞語1", "詞語2"]`
//! - `{"title": "動物篇", "words": ["詞語1", "詞語2"]}`（title は省略可）
//!
//! 手入力のリストなので重複排除はしない。

use serde_json::Value;
use thiserror::Error;

use crate::types::WorksheetDraft;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Error parsing JSON file. Please check the file format. ({0})")]
    Parse(String),

    #[error("Invalid JSON format. Please provide an array of words or an object with a 'words' array.")]
    Shape,
}

/// JSONテキストから下書きを作る
pub fn parse_word_list(text: &str) -> Result<WorksheetDraft, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|e| ImportError::Parse(e.to_string()))?;

    match value {
        Value::Array(items) => Ok(WorksheetDraft::new("", string_items(&items)?)),
        Value::Object(map) => {
            let words = match map.get("words") {
                Some(Value::Array(items)) => string_items(items)?,
                _ => return Err(ImportError::Shape),
            };
            let title = match map.get("title") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(_) => return Err(ImportError::Shape),
            };
            Ok(WorksheetDraft::new(title, words))
        }
        _ => Err(ImportError::Shape),
    }
}

fn string_items(items: &[Value]) -> Result<Vec<String>, ImportError> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or(ImportError::Shape))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let draft = parse_word_list(r#"["狗", "貓"]"#).unwrap();
        assert_eq!(draft.title, "");
        assert_eq!(draft.words, vec!["狗", "貓"]);
    }

    #[test]
    fn test_object_with_title() {
        let draft = parse_word_list(r#"{"title": "動物篇", "words": ["狗"]}"#).unwrap();
        assert_eq!(draft.title, "動物篇");
        assert_eq!(draft.words, vec!["狗"]);
    }

    #[test]
    fn test_object_keeps_duplicates() {
        let draft = parse_word_list(r#"{"words": ["狗", "貓", "狗"]}"#).unwrap();
        assert_eq!(draft.title, "");
        assert_eq!(draft.words, vec!["狗", "貓", "狗"]);
    }

    #[test]
    fn test_parse_error() {
        let result = parse_word_list("{not json");
        assert!(matches!(result, Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_shape_errors() {
        for text in [
            r#""just a string""#,
            r#"{"title": "T"}"#,
            r#"{"words": "狗"}"#,
            r#"{"words": ["狗", 1]}"#,
            r#"{"title": 5, "words": []}"#,
            "42",
        ] {
            assert_eq!(parse_word_list(text), Err(ImportError::Shape), "{}", text);
        }
    }

    #[test]
    fn test_export_import_round_trip() {
        let draft = WorksheetDraft::new("形容詞篇", vec!["長".into(), "".into(), "長".into()]);
        let reimported = parse_word_list(&draft.to_json()).unwrap();
        assert_eq!(reimported, draft);
    }
}

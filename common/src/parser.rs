//! モデル応答パーサー
//!
//! モデルは指示に反して前後に説明文を付けることがあるので、
//! 最初の `{ ... }` を取り出してから {title, words} として検証する。

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

lazy_static::lazy_static! {
    // 最短一致: 最初の `{` から最初の `}` まで
    static ref OBJECT_RE: Regex = Regex::new(r"\{[\s\S]*?\}").unwrap();
}

/// 抽出済みのワークシート（usage は含まない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWorksheet {
    pub title: String,
    pub words: Vec<String>,
}

/// 応答テキストから最初のJSONオブジェクト部分を抽出
///
/// # Examples
/// ```
/// use circle_grid_common::extract_json_object;
///
/// let json = extract_json_object("here: {\"title\": \"T\"} done").unwrap();
/// assert_eq!(json, "{\"title\": \"T\"}");
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    OBJECT_RE
        .find(response)
        .map(|m| m.as_str())
        .ok_or_else(|| Error::ExtractionFailed("JSONオブジェクトが見つかりません".into()))
}

/// 応答テキストを {title, words} としてパース
///
/// - JSONが見つからない・パースできない → `ExtractionFailed`
/// - title が空/文字列でない、words が配列でない → `InvalidModelResponse`
/// - words は出現順を保って重複排除
pub fn parse_worksheet_reply(response: &str) -> Result<ParsedWorksheet> {
    let json_str = extract_json_object(response)?;
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| Error::ExtractionFailed(format!("JSONパースエラー: {}", e)))?;

    let Some(map) = value.as_object() else {
        return Err(Error::InvalidModelResponse("JSON object not found".into()));
    };

    let title = get_string(map, "title")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::InvalidModelResponse("title がありません".into()))?;

    let words = map
        .get("words")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidModelResponse("words が配列ではありません".into()))?;

    let words = words.iter().filter_map(value_to_word).collect::<Vec<_>>();

    Ok(ParsedWorksheet {
        title,
        words: dedup_preserving_order(words),
    })
}

/// 最初の出現順を保って重複排除
pub fn dedup_preserving_order(words: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    words
        .into_iter()
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_word(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

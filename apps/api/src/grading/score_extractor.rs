//! Score Extractor — recovers the score block the model embeds in its prose.
//!
//! The block is located with a non-greedy `{ ... }` scan: the first `{` up to
//! the first `}` after it. Only that first match is parsed, even when later
//! brace pairs exist (for example JSON quoted inside improvement suggestions).
//! A nested object therefore truncates at its inner `}` and fails to parse.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::grading::scores::ScoreMapping;

/// First `{` to the nearest following `}`, across newlines.
pub(crate) static SCORE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*?\}").expect("score block pattern is valid"));

#[derive(Debug, Error)]
pub enum ScoreParseError {
    #[error("no score block found in response")]
    NoBlock,

    #[error("score block is not a valid JSON object: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("score for '{category}' is not a number")]
    NonNumeric { category: String },
}

/// Extracts the score mapping from a raw model response.
///
/// Returns `None` when no block is found or the first block does not parse.
/// Absence is an expected outcome; callers skip the chart.
pub fn extract_scores(raw: &str) -> Option<ScoreMapping> {
    match parse_score_block(raw) {
        Ok(scores) => {
            debug!("Extracted {} scores from response", scores.len());
            Some(scores)
        }
        Err(ScoreParseError::NoBlock) => {
            debug!("Response contains no score block");
            None
        }
        Err(e) => {
            warn!("Failed to parse score block: {e}");
            None
        }
    }
}

/// Parses the first score block, reporting why it could not be used.
pub fn parse_score_block(raw: &str) -> Result<ScoreMapping, ScoreParseError> {
    let block = SCORE_BLOCK.find(raw).ok_or(ScoreParseError::NoBlock)?;
    let object: Map<String, Value> = serde_json::from_str(block.as_str())?;

    object
        .into_iter()
        .map(|(category, value)| match coerce_score(&value) {
            Some(score) => Ok((category, score)),
            None => Err(ScoreParseError::NonNumeric { category }),
        })
        .collect()
}

/// Integers pass through; fractional numbers are rounded to the nearest integer.
fn coerce_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block_is_parsed_exactly() {
        let raw = "1. 分析...\n{\"切題性\":4,\"結構與邏輯\":3,\"專業與政策理解\":5,\"批判與建議具體性\":4,\"語言與表達\":2}\n2. 總分 18...";
        let scores = extract_scores(raw).expect("block should parse");

        let pairs: Vec<_> = scores.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("切題性", 4),
                ("結構與邏輯", 3),
                ("專業與政策理解", 5),
                ("批判與建議具體性", 4),
                ("語言與表達", 2),
            ]
        );
    }

    #[test]
    fn test_block_spanning_lines_inside_code_fence() {
        let raw = "分數如下：\n```json\n{\n  \"切題性\": 3,\n  \"語言與表達\": 5\n}\n```\n以上。";
        let scores = extract_scores(raw).unwrap();
        assert_eq!(scores.get("切題性"), Some(3));
        assert_eq!(scores.get("語言與表達"), Some(5));
    }

    #[test]
    fn test_no_braces_is_absent() {
        assert!(extract_scores("整體而言論述完整，但缺乏具體建議。").is_none());
        assert!(matches!(
            parse_score_block("plain prose"),
            Err(ScoreParseError::NoBlock)
        ));
    }

    #[test]
    fn test_first_block_wins_over_later_blocks() {
        let raw = "{\"切題性\": 4}\n改進建議範例：{\"切題性\": 1, \"語言與表達\": 1}";
        let scores = extract_scores(raw).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get("切題性"), Some(4));
    }

    #[test]
    fn test_unparsable_first_block_is_absent_even_if_later_block_is_valid() {
        let raw = "參見 {第一段} 之說明。\n{\"切題性\": 4}";
        assert!(extract_scores(raw).is_none());
        assert!(matches!(
            parse_score_block(raw),
            Err(ScoreParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_nested_object_truncates_and_fails() {
        let raw = r#"{"scores": {"切題性": 4}}"#;
        assert!(extract_scores(raw).is_none());
    }

    #[test]
    fn test_fractional_scores_are_rounded() {
        let scores = extract_scores(r#"{"切題性": 3.6, "結構與邏輯": 2.4}"#).unwrap();
        assert_eq!(scores.get("切題性"), Some(4));
        assert_eq!(scores.get("結構與邏輯"), Some(2));
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let scores = extract_scores(r#"{"切題性": 9, "語言與表達": -2}"#).unwrap();
        assert_eq!(scores.get("切題性"), Some(9));
        assert_eq!(scores.get("語言與表達"), Some(-2));
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let scores = extract_scores(r#"{"創意": 3}"#).unwrap();
        assert_eq!(scores.get("創意"), Some(3));
    }

    #[test]
    fn test_non_numeric_value_is_absent() {
        let raw = r#"{"切題性": "四分"}"#;
        assert!(extract_scores(raw).is_none());
        match parse_score_block(raw) {
            Err(ScoreParseError::NonNumeric { category }) => assert_eq!(category, "切題性"),
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_object_parses_to_empty_mapping() {
        let scores = extract_scores("{}").unwrap();
        assert!(scores.is_empty());
    }
}

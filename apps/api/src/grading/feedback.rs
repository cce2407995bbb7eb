//! Feedback Splitter — the narrative portion of a response, for display.

use crate::grading::score_extractor::SCORE_BLOCK;

/// Removes every `{ ... }` block from `raw` and trims the result.
///
/// This removes all blocks while `extract_scores` reads only the first one, so
/// example JSON in later sections is hidden from the narrative as well.
pub fn strip_score_block(raw: &str) -> String {
    SCORE_BLOCK.replace_all(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_embedded_block_and_keeps_prose() {
        let raw = "1. 分析...\n{\"切題性\":4,\"語言與表達\":2}\n2. 總分 18...";
        let narrative = strip_score_block(raw);
        assert_eq!(narrative, "1. 分析...\n\n2. 總分 18...");
        assert!(!narrative.contains('{'));
    }

    #[test]
    fn test_removes_every_block_not_just_the_first() {
        let raw = "{\"切題性\": 4}\n改進建議：可參考 {\"範例\": 1} 格式。";
        assert_eq!(strip_score_block(raw), "改進建議：可參考  格式。");
    }

    #[test]
    fn test_multiline_block_is_removed() {
        let raw = "開頭\n{\n  \"切題性\": 4,\n  \"結構與邏輯\": 3\n}\n結尾";
        assert_eq!(strip_score_block(raw), "開頭\n\n結尾");
    }

    #[test]
    fn test_prose_without_braces_is_only_trimmed() {
        let raw = "  整體論述完整。\n";
        assert_eq!(strip_score_block(raw), "整體論述完整。");
    }

    #[test]
    fn test_stripping_is_idempotent() {
        let inputs = [
            "a {x} b {y} c",
            "{a{b}c}",
            "} { {",
            "x {\"k\": {\"n\": 1}} y",
            "no braces",
        ];
        for raw in inputs {
            let once = strip_score_block(raw);
            assert!(!SCORE_BLOCK.is_match(&once), "residual block in {once:?}");
            assert_eq!(strip_score_block(&once), once);
        }
    }
}

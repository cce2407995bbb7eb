//! Prompt Builder — renders the grading instruction, rubric and submission
//! into the single prompt sent to the model. Pure; no I/O.

use serde_json::Value;

use crate::grading::prompts::{EXAMPLE_SCORES, GRADER_PERSONA, GRADING_PROMPT_TEMPLATE};
use crate::grading::rubric::{Rubric, MAX_SCORE};

/// Builds the grading prompt for one (question, answer) pair.
///
/// Question and answer are interpolated verbatim. Placeholders inside them are
/// never expanded because the template is filled in a single pass.
pub fn build_prompt(question: &str, answer: &str, rubric: &Rubric) -> String {
    let category_count = rubric.len().to_string();
    let max_score = MAX_SCORE.to_string();
    let max_total = rubric.max_total().to_string();
    let rubric_text = render_rubric(rubric);
    let score_example = render_score_example(rubric);

    render_template(
        GRADING_PROMPT_TEMPLATE,
        &[
            ("persona", GRADER_PERSONA),
            ("category_count", &category_count),
            ("max_score", &max_score),
            ("max_total", &max_total),
            ("rubric", &rubric_text),
            ("question", question),
            ("answer", answer),
            ("score_example", &score_example),
        ],
    )
}

/// One `- name：description` line per category, in rubric order.
fn render_rubric(rubric: &Rubric) -> String {
    rubric
        .categories()
        .iter()
        .map(|c| format!("- {}：{}", c.name, c.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A pretty-printed JSON object keyed by the exact category names.
fn render_score_example(rubric: &Rubric) -> String {
    let lines: Vec<String> = rubric
        .names()
        .zip(EXAMPLE_SCORES.iter().cycle())
        .map(|(name, score)| format!("  {}: {score}", Value::from(name)))
        .collect();
    format!("{{\n{}\n}}", lines.join(",\n"))
}

/// Replaces each `{key}` in `template` with its value, scanning left to right
/// once. Unknown `{...}` sequences are copied through untouched.
fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = vars.iter().find(|(key, _)| {
            tail[1..]
                .strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::score_extractor::extract_scores;

    #[test]
    fn test_prompt_contains_question_and_answer_verbatim() {
        let question = "試論社會救助法之補充性原則。";
        let answer = "補充性原則係指國家僅於個人窮盡自身資源後始介入……";
        let prompt = build_prompt(question, answer, &Rubric::standard());

        assert!(prompt.contains(&format!("題目：{question}")));
        assert!(prompt.contains(&format!("用戶回答：{answer}")));
    }

    #[test]
    fn test_prompt_contains_every_category_name() {
        let rubric = Rubric::standard();
        let prompt = build_prompt("X", "Y", &rubric);
        for category in rubric.categories() {
            assert!(prompt.contains(category.name), "missing {}", category.name);
            assert!(
                prompt.contains(category.description),
                "missing description for {}",
                category.name
            );
        }
    }

    #[test]
    fn test_prompt_lists_five_required_sections() {
        let prompt = build_prompt("X", "Y", &Rubric::standard());
        for heading in ["1. ", "2. 總分", "3. 專業回饋", "4. 改進建議", "5. 參考改進後的範例答案"] {
            assert!(prompt.contains(heading), "missing section {heading}");
        }
        assert!(prompt.starts_with(GRADER_PERSONA));
        assert!(prompt.contains("每個指標滿分5分，總分25分"));
    }

    #[test]
    fn test_placeholders_in_user_text_are_not_expanded() {
        let prompt = build_prompt("{answer}", "{rubric} {question}", &Rubric::standard());
        assert!(prompt.contains("題目：{answer}\n"));
        assert!(prompt.contains("用戶回答：{rubric} {question}\n"));
    }

    #[test]
    fn test_score_example_round_trips_through_extractor() {
        let rubric = Rubric::standard();
        let example = render_score_example(&rubric);
        let scores = extract_scores(&example).expect("example block must parse");

        let keys: Vec<_> = scores.iter().map(|(name, _)| name).collect();
        let expected: Vec<_> = rubric.names().collect();
        assert_eq!(keys, expected);
        assert_eq!(scores.get("切題性"), Some(4));
        assert_eq!(scores.get("語言與表達"), Some(2));
    }

    #[test]
    fn test_render_template_keeps_unknown_braces() {
        let out = render_template("{a} {b} {", &[("a", "1")]);
        assert_eq!(out, "1 {b} {");
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let rubric = Rubric::standard();
        assert_eq!(build_prompt("Q", "A", &rubric), build_prompt("Q", "A", &rubric));
    }
}

// All LLM prompt text for essay grading.
// The rubric list and the example score block are generated from `Rubric`
// so category names stay identical to the keys the extractor reads back.

/// Persona the model grades as.
pub const GRADER_PERSONA: &str =
    "你是一位嚴謹、專業且善於教學的法學專家，專長於行政法與社會福利政策。";

/// Grading prompt template.
/// Replace: {persona}, {category_count}, {max_score}, {max_total}, {rubric},
///          {question}, {answer}, {score_example}
pub const GRADING_PROMPT_TEMPLATE: &str = "{persona}
請根據下列{category_count}個指標，針對學生的申論題答案進行專業評分與評論，每個指標滿分{max_score}分，總分{max_total}分。
請僅根據提供的知識庫內容進行批改與回饋，並給予具體的改進建議。

{rubric}

請依下列格式回覆：
1. 各項指標分數（每項{max_score}分，並簡要說明評分理由）
2. 總分
3. 專業回饋（針對答案優缺點給予具體評論）
4. 改進建議（明確指出如何提升答案品質）
5. 參考改進後的範例答案（根據知識庫內容重寫更佳答案）

題目：{question}
用戶回答：{answer}

請將各項指標分數以 JSON 格式回傳，鍵必須與上列指標名稱完全相同，值為 0 到 {max_score} 的整數，例如：
{score_example}";

/// Example values shown in the score block, cycled across categories.
pub const EXAMPLE_SCORES: [i64; 5] = [4, 3, 5, 4, 2];

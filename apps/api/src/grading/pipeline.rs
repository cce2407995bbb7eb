//! Grading pipeline — orchestrates one grading call.
//!
//! Flow: validate input → build_prompt → LLM grade → (extract_scores,
//!       strip_score_block) on the same raw text → render_chart.
//!
//! Only input and provider failures abort. A missing or malformed score block
//! degrades to "no scores, no chart" with the narrative still returned.

use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use crate::grading::chart::{render_chart, ChartData};
use crate::grading::feedback::strip_score_block;
use crate::grading::prompt_builder::build_prompt;
use crate::grading::rubric::Rubric;
use crate::grading::score_extractor::{extract_scores, parse_score_block, ScoreParseError};
use crate::grading::scores::ScoreMapping;
use crate::llm_client::{GradingClient, LlmError};

/// User-facing warning for an incomplete submission.
pub const MISSING_INPUT_WARNING: &str = "請輸入題目與答案";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("請輸入題目與答案 ({field} is empty)")]
    Empty { field: &'static str },
}

#[derive(Debug, Error)]
pub enum GradingError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("獲取回饋時發生錯誤: {0}")]
    Provider(#[from] LlmError),
}

/// A validated (question, answer) pair. Both fields are non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingRequest {
    question: String,
    answer: String,
}

impl GradingRequest {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Result<Self, InputError> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() {
            return Err(InputError::Empty { field: "question" });
        }
        if answer.trim().is_empty() {
            return Err(InputError::Empty { field: "answer" });
        }

        Ok(Self { question, answer })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Everything the presentation layer needs from one grading call.
#[derive(Debug, Clone)]
pub struct GradingOutcome {
    pub raw_response: String,
    /// Raw response with every score block removed.
    pub feedback: String,
    pub scores: Option<ScoreMapping>,
    /// Why a score block that was found could not be used. `None` when scores
    /// were extracted or the response has no block at all.
    pub score_error: Option<String>,
    /// Present only when `scores` is present and non-empty.
    pub chart: Option<ChartData>,
    /// Rubric categories absent from `scores`. Empty when `scores` is `None`.
    pub missing_categories: Vec<&'static str>,
}

impl GradingOutcome {
    pub fn total(&self) -> Option<i64> {
        self.scores.as_ref().and_then(ScoreMapping::total)
    }
}

/// Validates the raw fields, then grades. The client is never called for
/// blank input.
pub async fn grade_submission(
    llm: &dyn GradingClient,
    rubric: &Rubric,
    question: &str,
    answer: &str,
) -> Result<GradingOutcome, GradingError> {
    let request = GradingRequest::new(question, answer).inspect_err(|e| {
        warn!("Rejected grading submission: {e}");
    })?;
    Ok(grade_essay(llm, rubric, &request).await?)
}

/// Runs the grading pipeline for a validated request.
pub async fn grade_essay(
    llm: &dyn GradingClient,
    rubric: &Rubric,
    request: &GradingRequest,
) -> Result<GradingOutcome, LlmError> {
    let prompt = build_prompt(request.question(), request.answer(), rubric);
    info!(
        "Grading submission: question_chars={}, answer_chars={}",
        request.question().chars().count(),
        request.answer().chars().count()
    );

    let started = Instant::now();
    let raw_response = llm.grade(&prompt).await?;
    info!(
        "Grading response received in {}ms ({} chars)",
        started.elapsed().as_millis(),
        raw_response.chars().count()
    );

    Ok(assemble_outcome(rubric, raw_response))
}

/// Derives scores, narrative and chart from a raw response.
fn assemble_outcome(rubric: &Rubric, raw_response: String) -> GradingOutcome {
    let scores = extract_scores(&raw_response);
    let feedback = strip_score_block(&raw_response);

    let score_error = match &scores {
        Some(_) => None,
        None => match parse_score_block(&raw_response) {
            Err(ScoreParseError::NoBlock) | Ok(_) => None,
            Err(e) => Some(format!("解析分數 JSON 失敗: {e}")),
        },
    };

    let (chart, missing_categories) = match &scores {
        Some(scores) => {
            let missing = rubric.missing_categories(scores);
            if !missing.is_empty() {
                warn!("Score block is missing categories: {missing:?}");
            }
            for (category, score) in rubric.out_of_range(scores) {
                warn!("Score for '{category}' is outside the rubric range: {score}");
            }
            (render_chart(scores), missing)
        }
        None => {
            info!("No usable score block; chart skipped");
            (None, Vec::new())
        }
    };

    GradingOutcome {
        raw_response,
        feedback,
        scores,
        score_error,
        chart,
        missing_categories,
    }
}

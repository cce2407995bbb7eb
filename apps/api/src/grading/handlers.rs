//! Axum route handlers for the Grading API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::grading::chart::ChartData;
use crate::grading::pipeline::grade_submission;
use crate::grading::rubric::{Category, MAX_SCORE, MIN_SCORE};
use crate::grading::scores::ScoreMapping;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Missing fields deserialize as empty and are rejected as an input warning.
#[derive(Debug, Deserialize)]
pub struct GradeRequestBody {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ChartView {
    #[serde(flatten)]
    pub data: ChartData,
    pub figure: Value,
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub grading_id: Uuid,
    pub graded_at: DateTime<Utc>,
    pub feedback: String,
    pub raw_response: String,
    pub scores: Option<ScoreMapping>,
    pub score_error: Option<String>,
    /// Null when there are no scores or their sum overflows.
    pub total: Option<i64>,
    pub max_total: i64,
    pub missing_categories: Vec<&'static str>,
    pub chart: Option<ChartView>,
}

#[derive(Debug, Serialize)]
pub struct RubricResponse {
    pub categories: Vec<Category>,
    pub min_score: i64,
    pub max_score: i64,
    pub max_total: i64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/grade
///
/// Grades one essay answer. Scores and chart are null when the model's
/// response carries no usable score block; feedback is always returned.
pub async fn handle_grade(
    State(state): State<AppState>,
    payload: Result<Json<GradeRequestBody>, JsonRejection>,
) -> Result<Json<GradeResponse>, AppError> {
    let Json(request) = payload?;

    let outcome = grade_submission(
        state.llm.as_ref(),
        &state.rubric,
        &request.question,
        &request.answer,
    )
    .await?;

    let total = outcome.total();
    let chart = outcome.chart.map(|data| ChartView {
        figure: data.to_plotly_figure(),
        data,
    });

    Ok(Json(GradeResponse {
        grading_id: Uuid::new_v4(),
        graded_at: Utc::now(),
        feedback: outcome.feedback,
        raw_response: outcome.raw_response,
        scores: outcome.scores,
        score_error: outcome.score_error,
        total,
        max_total: state.rubric.max_total(),
        missing_categories: outcome.missing_categories,
        chart,
    }))
}

/// GET /api/v1/rubric
///
/// Returns the scoring categories in display order.
pub async fn handle_get_rubric(State(state): State<AppState>) -> Json<RubricResponse> {
    Json(RubricResponse {
        categories: state.rubric.categories().to_vec(),
        min_score: MIN_SCORE,
        max_score: MAX_SCORE,
        max_total: state.rubric.max_total(),
    })
}

use std::sync::Arc;

use crate::grading::rubric::Rubric;
use crate::llm_client::GradingClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable grading client. Production: `GeminiClient`.
    pub llm: Arc<dyn GradingClient>,
    pub rubric: Arc<Rubric>,
}

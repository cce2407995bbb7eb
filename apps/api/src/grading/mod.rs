// Essay grading pipeline.
// Implements: rubric, prompt building, score extraction, feedback splitting, radar chart.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod chart;
pub mod feedback;
pub mod handlers;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod rubric;
pub mod score_extractor;
pub mod scores;

//! Rubric — the fixed, ordered set of scoring categories.
//!
//! Category names double as the JSON keys the model is told to emit, so the
//! prompt and the score extractor both read them from here.

use serde::Serialize;

use crate::grading::scores::ScoreMapping;

/// Lowest score a single category can receive.
pub const MIN_SCORE: i64 = 0;
/// Highest score a single category can receive.
pub const MAX_SCORE: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub description: &'static str,
}

/// Ordered scoring categories. Order drives prompt rendering and chart axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric {
    categories: Vec<Category>,
}

impl Rubric {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The essay rubric for administrative law and social welfare policy answers.
    pub fn standard() -> Self {
        Self::new(vec![
            Category {
                name: "切題性",
                description: "答案是否緊扣題目要求，內容有無偏離主題。",
            },
            Category {
                name: "結構與邏輯",
                description: "答案是否有清晰的結構，論述是否有邏輯性與層次。",
            },
            Category {
                name: "專業與政策理解",
                description: "對行政法與社會福利政策的專業知識掌握與應用程度。",
            },
            Category {
                name: "批判與建議具體性",
                description: "是否能提出具體、深入的批判與建議。",
            },
            Category {
                name: "語言與表達",
                description: "語言是否精確、流暢，表達是否清楚。",
            },
        ])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn max_total(&self) -> i64 {
        self.categories.len() as i64 * MAX_SCORE
    }

    /// Rubric categories that have no entry in `scores`, in rubric order.
    pub fn missing_categories(&self, scores: &ScoreMapping) -> Vec<&'static str> {
        self.names()
            .filter(|name| scores.get(name).is_none())
            .collect()
    }

    /// Entries whose value falls outside `[MIN_SCORE, MAX_SCORE]`, in mapping order.
    pub fn out_of_range<'a>(&self, scores: &'a ScoreMapping) -> Vec<(&'a str, i64)> {
        scores
            .iter()
            .filter(|(_, score)| !(MIN_SCORE..=MAX_SCORE).contains(score))
            .collect()
    }
}

//! Chart Renderer — radar (closed polygon) chart data from a score mapping.

use serde::Serialize;
use serde_json::{json, Value};

use crate::grading::rubric::{MAX_SCORE, MIN_SCORE};
use crate::grading::scores::ScoreMapping;

/// Radial axis range. Fixed to the rubric bounds; never rescaled to the data.
pub const RADIAL_RANGE: [i64; 2] = [MIN_SCORE, MAX_SCORE];

/// Trace name shown for the score polygon.
const TRACE_NAME: &str = "分數";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub category: String,
    pub score: i64,
}

/// Closed polygon: the first point is repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    pub radial_range: [i64; 2],
}

/// Builds chart data in the mapping's order. Returns `None` for an empty mapping.
pub fn render_chart(scores: &ScoreMapping) -> Option<ChartData> {
    if scores.is_empty() {
        return None;
    }

    let mut points: Vec<ChartPoint> = scores
        .iter()
        .map(|(category, score)| ChartPoint {
            category: category.to_string(),
            score,
        })
        .collect();

    let first = points.first()?.clone();
    points.push(first);

    Some(ChartData {
        points,
        radial_range: RADIAL_RANGE,
    })
}

impl ChartData {
    /// A Plotly figure (`scatterpolar`, filled) the presentation layer can draw as-is.
    pub fn to_plotly_figure(&self) -> Value {
        let r: Vec<i64> = self.points.iter().map(|p| p.score).collect();
        let theta: Vec<&str> = self.points.iter().map(|p| p.category.as_str()).collect();

        json!({
            "data": [{
                "type": "scatterpolar",
                "r": r,
                "theta": theta,
                "fill": "toself",
                "name": TRACE_NAME,
            }],
            "layout": {
                "polar": {
                    "radialaxis": { "visible": true, "range": self.radial_range }
                },
                "showlegend": false,
            }
        })
    }
}

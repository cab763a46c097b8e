//! Deterministic substitutes for coach backend failures.
//!
//! A failed backend call is replaced by fixed placeholder data so the
//! interview flow and the report rendering always receive something to
//! work with. Callers log the underlying error before substituting; the
//! failure is never surfaced to the user as an error.

use prep_core::model::{STANDARD_METRICS, Score};

use super::AnalysisOutcome;

/// Conventional length of a generated question list.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Placeholder question list of the conventional length.
#[must_use]
pub fn fallback_questions(specialization: &str) -> Vec<String> {
    (1..=DEFAULT_QUESTION_COUNT)
        .map(|i| {
            format!(
                "This is mock question {i} for {specialization}. \
                 The local AI call failed. Is the server running?"
            )
        })
        .collect()
}

/// Neutral report covering the conventional metric set at score zero.
#[must_use]
pub fn fallback_report() -> AnalysisOutcome {
    AnalysisOutcome {
        overall_feedback: "This is mock feedback because the local AI call failed. \
                           Ensure the model and the proxy server are running."
            .to_string(),
        scores: STANDARD_METRICS
            .iter()
            .map(|metric| {
                Score::new(
                    *metric,
                    0,
                    format!("Mock feedback for {}.", metric.to_lowercase()),
                )
            })
            .collect(),
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::AnswerRecord;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("score {score} for metric '{metric}' is out of range (0-10)")]
    ScoreOutOfRange { metric: String, score: u8 },
}

//
// ─── SCORES ────────────────────────────────────────────────────────────────────
//

/// The conventional metric set the analysis backend is asked to cover.
pub const STANDARD_METRICS: [&str; 4] = ["Fluency", "Tone", "Grammar", "Content Quality"];

/// One metric evaluation within an analysis report.
///
/// Scores are expected in 1-10; 0 is the neutral value used by the
/// deterministic fallback report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub metric: String,
    pub score: u8,
    pub feedback: String,
}

impl Score {
    #[must_use]
    pub fn new(metric: impl Into<String>, score: u8, feedback: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            score,
            feedback: feedback.into(),
        }
    }
}

//
// ─── ANALYSIS REPORT ───────────────────────────────────────────────────────────
//

/// Structured scoring report for one finished interview run.
///
/// Immutable once built. Carries the overall feedback text, the per-metric
/// scores, and the answer records the analysis was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    overall_feedback: String,
    scores: Vec<Score>,
    answers: Vec<AnswerRecord>,
}

impl AnalysisReport {
    /// Build a report, validating every score against the 0-10 range.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::ScoreOutOfRange` if any metric score exceeds 10.
    pub fn new(
        overall_feedback: impl Into<String>,
        scores: Vec<Score>,
        answers: Vec<AnswerRecord>,
    ) -> Result<Self, ReportError> {
        for score in &scores {
            if score.score > 10 {
                return Err(ReportError::ScoreOutOfRange {
                    metric: score.metric.clone(),
                    score: score.score,
                });
            }
        }

        Ok(Self {
            overall_feedback: overall_feedback.into(),
            scores,
            answers,
        })
    }

    #[must_use]
    pub fn overall_feedback(&self) -> &str {
        &self.overall_feedback
    }

    #[must_use]
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Mean of the metric scores, rounded to one decimal.
    ///
    /// Returns 0.0 for a report with no scores, matching how the trend view
    /// treats an empty metric list.
    #[must_use]
    pub fn overall_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let total: u32 = self.scores.iter().map(|s| u32::from(s.score)).sum();
        let mean = f64::from(total) / self.scores.len() as f64;
        (mean * 10.0).round() / 10.0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

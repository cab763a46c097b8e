mod client;
mod fallback;

// Public API of the coach backend subsystem.
pub use crate::error::CoachError;
pub use client::{CoachClient, CoachConfig};
pub use fallback::{DEFAULT_QUESTION_COUNT, fallback_questions, fallback_report};

use async_trait::async_trait;
use prep_core::model::{AnswerRecord, Score};

/// Supplies the ordered question list for a domain/specialization pair.
///
/// The nominal contract is exactly [`DEFAULT_QUESTION_COUNT`] questions;
/// that count is a prompt convention, not structurally enforced.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Generate interview questions for the selected role.
    ///
    /// # Errors
    ///
    /// Returns `CoachError` on transport, status, or payload failures.
    async fn generate_questions(
        &self,
        domain: &str,
        specialization: &str,
    ) -> Result<Vec<String>, CoachError>;
}

/// Raw analysis result as returned by the backend, before the answer
/// records are attached to form a full report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub overall_feedback: String,
    pub scores: Vec<Score>,
}

/// Scores one finished answer set.
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    /// Request a scoring report for the full answer list of one session.
    ///
    /// # Errors
    ///
    /// Returns `CoachError` on transport, status, or payload failures.
    async fn analyze_answers(
        &self,
        answers: &[AnswerRecord],
    ) -> Result<AnalysisOutcome, CoachError>;
}

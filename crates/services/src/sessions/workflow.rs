use std::sync::Arc;

use tracing::warn;

use prep_core::Clock;
use prep_core::model::{AnalysisReport, Domain, InterviewSession};

use super::flow::InterviewFlow;
use super::history::SessionHistoryService;
use crate::ai::{AnalysisSource, QuestionSource, fallback_questions, fallback_report};
use crate::auth::AuthSession;
use crate::error::WorkflowError;

/// Orchestrates one interview run: the question fetch, the flow itself,
/// the analysis call, and persistence of the finished session.
///
/// Both external calls are awaited sequentially and never issued
/// concurrently for the same run. A backend failure is logged and replaced
/// by deterministic fallback data; it is not surfaced to the caller as an
/// error.
#[derive(Clone)]
pub struct InterviewLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionSource>,
    analysis: Arc<dyn AnalysisSource>,
    history: SessionHistoryService,
}

impl InterviewLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSource>,
        analysis: Arc<dyn AnalysisSource>,
        history: SessionHistoryService,
    ) -> Self {
        Self {
            clock,
            questions,
            analysis,
            history,
        }
    }

    /// Start a flow for the selected domain/specialization.
    ///
    /// The flow always receives a non-empty question list: a failed or
    /// empty backend response is replaced by the deterministic fallback
    /// questions.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownSelection` for a pair outside the
    /// catalog.
    pub async fn begin(
        &self,
        domain: &str,
        specialization: &str,
    ) -> Result<InterviewFlow, WorkflowError> {
        let known = Domain::find(domain).is_some_and(|d| d.has_specialization(specialization));
        if !known {
            return Err(WorkflowError::UnknownSelection {
                domain: domain.to_string(),
                specialization: specialization.to_string(),
            });
        }

        let questions = match self
            .questions
            .generate_questions(domain, specialization)
            .await
        {
            Ok(questions) if !questions.is_empty() => questions,
            Ok(_) => {
                warn!(specialization, "question backend returned an empty list, using fallback");
                fallback_questions(specialization)
            }
            Err(err) => {
                warn!(error = %err, specialization, "question generation failed, using fallback");
                fallback_questions(specialization)
            }
        };

        Ok(InterviewFlow::new(questions, self.clock.now())?)
    }

    /// Analyze a finished flow and persist the session for the caller.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFinished` if the flow has not completed,
    /// and propagates `HistoryError::NotAuthenticated`/storage failures
    /// from persistence. Analysis failures do not error; they degrade to
    /// the fallback report.
    pub async fn finish(
        &self,
        flow: &InterviewFlow,
        domain: &str,
        specialization: &str,
        auth: Option<&AuthSession>,
    ) -> Result<InterviewSession, WorkflowError> {
        if !flow.is_complete() {
            return Err(WorkflowError::NotFinished);
        }

        let answers = flow.answers().to_vec();
        let outcome = match self.analysis.analyze_answers(&answers).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "answer analysis failed, using fallback report");
                fallback_report()
            }
        };

        let report =
            match AnalysisReport::new(outcome.overall_feedback, outcome.scores, answers.clone()) {
                Ok(report) => report,
                Err(err) => {
                    warn!(error = %err, "analysis scores out of range, using fallback report");
                    let fallback = fallback_report();
                    AnalysisReport::new(fallback.overall_feedback, fallback.scores, answers)?
                }
            };

        Ok(self
            .history
            .record_session(auth, domain, specialization, report)
            .await?)
    }
}

use chrono::{DateTime, Utc};
use std::sync::Arc;

use prep_core::Clock;
use prep_core::model::{AnalysisReport, InterviewSession, SessionId};
use storage::repository::SessionRepository;

use crate::auth::AuthSession;
use crate::error::HistoryError;

/// Per-session point for the progress trend display.
///
/// Presentation-agnostic: timestamps and metric names are passed through
/// raw so callers may format or chart them as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub session_id: SessionId,
    pub completed_at: DateTime<Utc>,
    pub specialization: String,
    /// Mean of the metric scores, rounded to one decimal.
    pub overall: f64,
    pub metrics: Vec<(String, u8)>,
}

impl TrendPoint {
    #[must_use]
    pub fn from_session(session: &InterviewSession) -> Self {
        let report = session.report();
        Self {
            session_id: session.id(),
            completed_at: session.completed_at(),
            specialization: session.specialization().to_string(),
            overall: report.overall_score(),
            metrics: report
                .scores()
                .iter()
                .map(|s| (s.metric.clone(), s.score))
                .collect(),
        }
    }
}

/// Append/list facade over the session store, keyed by the authenticated
/// user.
///
/// Stored sessions are append-only and immutable; the only queries are the
/// insertion-ordered history and the trend derived from it.
#[derive(Clone)]
pub struct SessionHistoryService {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
}

impl SessionHistoryService {
    #[must_use]
    pub fn new(clock: Clock, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { clock, sessions }
    }

    /// Build and persist the immutable session entity for a finished run.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NotAuthenticated` when no session context is
    /// supplied, or `HistoryError::Storage` on persistence failures.
    pub async fn record_session(
        &self,
        auth: Option<&AuthSession>,
        domain: &str,
        specialization: &str,
        report: AnalysisReport,
    ) -> Result<InterviewSession, HistoryError> {
        let auth = auth.ok_or(HistoryError::NotAuthenticated)?;

        let session = InterviewSession::new(
            SessionId::generate(),
            self.clock.now(),
            domain,
            specialization,
            report,
        );
        self.sessions
            .append_session(auth.user_id(), &session)
            .await?;
        Ok(session)
    }

    /// The caller's history in insertion order; empty when unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn sessions(
        &self,
        auth: Option<&AuthSession>,
    ) -> Result<Vec<InterviewSession>, HistoryError> {
        let Some(auth) = auth else {
            return Ok(Vec::new());
        };
        Ok(self.sessions.list_sessions(auth.user_id()).await?)
    }

    /// Score trend across the caller's history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn trend(&self, auth: Option<&AuthSession>) -> Result<Vec<TrendPoint>, HistoryError> {
        let sessions = self.sessions(auth).await?;
        Ok(sessions.iter().map(TrendPoint::from_session).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthService, SignUp};
    use prep_core::model::Score;
    use prep_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn build_report(scores: &[u8]) -> AnalysisReport {
        let metrics = ["Fluency", "Tone", "Grammar", "Content Quality"];
        AnalysisReport::new(
            "overall",
            scores
                .iter()
                .zip(metrics.iter())
                .map(|(value, metric)| Score::new(*metric, *value, "noted"))
                .collect(),
            Vec::new(),
        )
        .unwrap()
    }

    async fn signed_in(repo: &InMemoryRepository) -> AuthSession {
        let auth = AuthService::new(fixed_clock(), Arc::new(repo.clone()));
        auth.sign_up(SignUp {
            name: "Ada".into(),
            email: "ada@x.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn recording_requires_authentication() {
        let repo = InMemoryRepository::new();
        let history = SessionHistoryService::new(fixed_clock(), Arc::new(repo));

        let err = history
            .record_session(None, "Tech & Engineering", "Backend Developer", build_report(&[7]))
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::NotAuthenticated));
    }

    #[tokio::test]
    async fn recorded_session_comes_back_unchanged() {
        let repo = InMemoryRepository::new();
        let session_ctx = signed_in(&repo).await;
        let history = SessionHistoryService::new(fixed_clock(), Arc::new(repo));

        let stored = history
            .record_session(
                Some(&session_ctx),
                "Tech & Engineering",
                "Backend Developer",
                build_report(&[7, 8, 9, 6]),
            )
            .await
            .unwrap();

        let listed = history.sessions(Some(&session_ctx)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], stored);
    }

    #[tokio::test]
    async fn unauthenticated_history_is_empty() {
        let repo = InMemoryRepository::new();
        let history = SessionHistoryService::new(fixed_clock(), Arc::new(repo));

        assert!(history.sessions(None).await.unwrap().is_empty());
        assert!(history.trend(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn trend_reports_overall_and_metric_scores() {
        let repo = InMemoryRepository::new();
        let session_ctx = signed_in(&repo).await;
        let history = SessionHistoryService::new(fixed_clock(), Arc::new(repo));

        history
            .record_session(
                Some(&session_ctx),
                "Tech & Engineering",
                "Backend Developer",
                build_report(&[7, 8, 9, 6]),
            )
            .await
            .unwrap();

        let trend = history.trend(Some(&session_ctx)).await.unwrap();
        assert_eq!(trend.len(), 1);
        assert!((trend[0].overall - 7.5).abs() < f64::EPSILON);
        assert_eq!(trend[0].metrics.len(), 4);
        assert_eq!(trend[0].specialization, "Backend Developer");
    }
}

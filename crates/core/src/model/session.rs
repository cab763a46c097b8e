use chrono::{DateTime, Utc};

use crate::model::{AnalysisReport, SessionId};

/// A completed interview practice run and its scoring report.
///
/// Created exactly once, when the interview flow signals completion.
/// Immutable afterwards; owned by the user who recorded it.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewSession {
    id: SessionId,
    completed_at: DateTime<Utc>,
    domain: String,
    specialization: String,
    report: AnalysisReport,
}

impl InterviewSession {
    #[must_use]
    pub fn new(
        id: SessionId,
        completed_at: DateTime<Utc>,
        domain: impl Into<String>,
        specialization: impl Into<String>,
        report: AnalysisReport,
    ) -> Self {
        Self {
            id,
            completed_at,
            domain: domain.into(),
            specialization: specialization.into(),
            report,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    #[must_use]
    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Score;
    use crate::time::fixed_now;

    #[test]
    fn session_exposes_its_parts() {
        let report = AnalysisReport::new(
            "solid answers",
            vec![Score::new("Fluency", 8, "clear")],
            Vec::new(),
        )
        .unwrap();
        let id = SessionId::generate();
        let session = InterviewSession::new(
            id,
            fixed_now(),
            "Tech & Engineering",
            "Backend Developer",
            report,
        );

        assert_eq!(session.id(), id);
        assert_eq!(session.domain(), "Tech & Engineering");
        assert_eq!(session.specialization(), "Backend Developer");
        assert_eq!(session.completed_at(), fixed_now());
        assert_eq!(session.report().scores().len(), 1);
    }
}

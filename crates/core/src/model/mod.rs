mod answer;
mod domain;
mod ids;
mod report;
mod session;
mod user;

pub use answer::AnswerRecord;
pub use domain::{Domain, INTERVIEW_DOMAINS};
pub use ids::{ParseIdError, SessionId, UserId};
pub use report::{AnalysisReport, ReportError, STANDARD_METRICS, Score};
pub use session::InterviewSession;
pub use user::{User, UserError};

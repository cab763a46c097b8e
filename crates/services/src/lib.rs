#![forbid(unsafe_code)]

pub mod ai;
pub mod auth;
pub mod error;
pub mod sessions;

pub use prep_core::Clock;

pub use ai::{
    AnalysisOutcome, AnalysisSource, CoachClient, CoachConfig, DEFAULT_QUESTION_COUNT,
    QuestionSource,
};
pub use auth::{AuthService, AuthSession, SignUp};
pub use error::{AuthError, CoachError, FlowError, HistoryError, WorkflowError};

pub use sessions::{
    Advance, FlowProgress, InterviewFlow, InterviewLoopService, SessionHistoryService, TrendPoint,
};

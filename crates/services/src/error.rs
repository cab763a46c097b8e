//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::{ReportError, UserError};
use storage::repository::StorageError;

/// Errors emitted by the Question/Analysis Source clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoachError {
    #[error("coach backend reported: {0}")]
    Api(String),
    #[error("coach request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the interview flow state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    #[error("no questions available for the interview")]
    Empty,
    #[error("interview already completed")]
    Completed,
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("please fill in all fields")]
    MissingField,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("a user with this email already exists")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SessionHistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("user is not authenticated")]
    NotAuthenticated,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the interview workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error("unknown domain or specialization: {domain} / {specialization}")]
    UnknownSelection {
        domain: String,
        specialization: String,
    },
    #[error("interview is not finished")]
    NotFinished,
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

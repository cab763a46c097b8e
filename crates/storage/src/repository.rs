use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prep_core::model::{InterviewSession, User, UserError, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a user account.
///
/// Unlike the domain `User`, the record carries the stored password so the
/// auth service can check credentials; `to_user` strips it before anything
/// leaves the storage/auth boundary.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Convert the record back into a domain `User`, dropping the password.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if the stored email fails validation.
    pub fn to_user(&self) -> Result<User, UserError> {
        User::new(self.id, self.email.clone(), self.name.clone())
    }
}

/// Repository contract for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` when the email is already
    /// registered, or other storage errors.
    async fn insert_user(&self, record: &UserRecord) -> Result<(), StorageError>;

    /// Fetch an account by email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the lookup itself fails; an unknown
    /// email is `Ok(None)`.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError>;
}

/// Repository contract for completed interview sessions.
///
/// Sessions are append-only: there are no update or delete operations, and
/// a stored session is immutable.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Append a completed session to the owner's history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn append_session(
        &self,
        owner: UserId,
        session: &InterviewSession,
    ) -> Result<(), StorageError>;

    /// List the owner's sessions in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on lookup failures. An owner with no history
    /// yields an empty list.
    async fn list_sessions(&self, owner: UserId) -> Result<Vec<InterviewSession>, StorageError>;
}

/// Simple in-memory repository implementation for testing and the mock
/// backend.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<Mutex<Vec<UserRecord>>>,
    sessions: Arc<Mutex<HashMap<UserId, Vec<InterviewSession>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, record: &UserRecord) -> Result<(), StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|u| u.email == record.email) {
            return Err(StorageError::Conflict);
        }
        guard.push(record.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn append_session(
        &self,
        owner: UserId,
        session: &InterviewSession,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.entry(owner).or_default().push(session.clone());
        Ok(())
    }

    async fn list_sessions(&self, owner: UserId) -> Result<Vec<InterviewSession>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&owner).cloned().unwrap_or_default())
    }
}

/// Aggregates the repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let users: Arc<dyn UserRepository> = Arc::new(repo.clone());
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo);
        Self { users, sessions }
    }
}

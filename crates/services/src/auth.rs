use std::sync::Arc;

use chrono::{DateTime, Utc};

use prep_core::Clock;
use prep_core::model::{User, UserId};
use storage::repository::{StorageError, UserRecord, UserRepository};

use crate::error::AuthError;

//
// ─── AUTH SESSION ──────────────────────────────────────────────────────────────
//

/// Explicit authenticated-session context.
///
/// Replaces a global "current user" marker: created by `sign_in`/`sign_up`,
/// passed to every operation that needs identity, and simply dropped on
/// sign-out. Nothing about the current user is persisted.
#[derive(Debug, Clone)]
pub struct AuthSession {
    user: User,
    signed_in_at: DateTime<Utc>,
}

impl AuthSession {
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id()
    }

    #[must_use]
    pub fn signed_in_at(&self) -> DateTime<Utc> {
        self.signed_in_at
    }
}

//
// ─── AUTH SERVICE ──────────────────────────────────────────────────────────────
//

/// Registration input.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Registration and credential checking over a `UserRepository`.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    /// Minimum accepted password length.
    pub const MIN_PASSWORD_LEN: usize = 6;

    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self { clock, users }
    }

    /// Register a new account and open a session for it.
    ///
    /// Validation runs before any storage call: every field must be
    /// non-empty and the password at least [`Self::MIN_PASSWORD_LEN`]
    /// characters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField`, `AuthError::PasswordTooShort`,
    /// `AuthError::EmailTaken`, or storage failures.
    pub async fn sign_up(&self, input: SignUp) -> Result<AuthSession, AuthError> {
        if input.name.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(AuthError::MissingField);
        }
        if input.password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let now = self.clock.now();
        // TODO: hash passwords once a real backend replaces the mock store.
        let record = UserRecord {
            id: UserId::generate(),
            email: input.email,
            name: Some(input.name),
            password: input.password,
            created_at: now,
        };

        if let Err(err) = self.users.insert_user(&record).await {
            return Err(match err {
                StorageError::Conflict => AuthError::EmailTaken,
                other => AuthError::Storage(other),
            });
        }

        Ok(AuthSession {
            user: record.to_user()?,
            signed_in_at: now,
        })
    }

    /// Check credentials and open a session.
    ///
    /// The returned user never carries the password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or a
    /// wrong password, or storage failures.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let record = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if record.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthSession {
            user: record.to_user()?,
            signed_in_at: self.clock.now(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

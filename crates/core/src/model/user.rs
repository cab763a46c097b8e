use thiserror::Error;

use crate::model::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("email cannot be empty")]
    EmptyEmail,
}

/// A registered account.
///
/// Never carries the password: the persisted record in the storage layer
/// owns that field and strips it when converting back to this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    name: Option<String>,
}

impl User {
    /// Build a user, rejecting a blank email.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyEmail` if the email is empty or whitespace.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: Option<String>,
    ) -> Result<Self, UserError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }
        Ok(Self { id, email, name })
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

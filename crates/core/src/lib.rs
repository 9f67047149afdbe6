//! Shared primitives for all Rust crates in hrdesk.

#![forbid(unsafe_code)]

/// Access-control failure taxonomy shared by the pipeline and the stores.
pub mod access;
/// Authentication primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use access::{AccessError, CredentialError, RbacError};
pub use auth::{AccessContext, TokenClaims};

/// Result type used across hrdesk crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Request was rejected by the access-control pipeline.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Role graph mutation violated a store invariant.
    #[error(transparent)]
    Rbac(#[from] RbacError),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CredentialError> for AppError {
    fn from(value: CredentialError) -> Self {
        Self::Access(AccessError::Unauthenticated(value))
    }
}

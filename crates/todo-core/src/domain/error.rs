//! Domain Errors
//!
//! Every persistence operation reports failure through `DomainError` instead
//! of resolving to an empty value, so callers can tell failure kinds apart.

use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The hosted backend answered with a non-success status.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        DomainError::NotFound(format!("task {}", id))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DomainError::Serialization(err.to_string())
        } else {
            DomainError::Transport(err.to_string())
        }
    }
}

//! Error types shared by the read path.

use thiserror::Error;

use crate::policy::PolicyError;

/// A rejected input, reported before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", detail_suffix(.detail))]
pub struct ValidationError {
    /// Attribute the error refers to (e.g. `wait_for`, `api.base_url`).
    pub path: String,
    pub message: String,
    /// Underlying cause, when there is one.
    pub detail: Option<String>,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default()
}

/// Errors surfaced by a group read.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input; nothing was fetched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The group is absent from the policy document on the latest attempt.
    #[error("Unable to find group {name}")]
    NotFound { name: String },

    /// The policy could not be fetched or decoded.
    #[error("Failed to fetch policy: {0}")]
    Remote(#[from] PolicyError),

    /// The caller aborted the read.
    #[error("read cancelled before completion")]
    Cancelled,
}

impl Error {
    /// Whether the wait loop may try again after this error.
    ///
    /// Missing groups and remote failures are treated alike: a transient API
    /// error can't be told apart from a write that hasn't propagated yet.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::Remote(_))
    }
}

/// Result type for group reads.
pub type Result<T> = std::result::Result<T, Error>;

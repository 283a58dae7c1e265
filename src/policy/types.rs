//! Policy document shape and client errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The access-control policy as returned by the API.
///
/// Only the `groups` section is modelled; other sections (`acls`,
/// `tagOwners`, `hosts`, ...) are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PolicyDocument {
    /// Group name → members, in the order the policy lists them.
    #[serde(default)]
    pub groups: HashMap<String, Vec<String>>,
}

impl PolicyDocument {
    /// Decode a policy from its JSON form.
    pub fn from_json(body: &str) -> PolicyResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Errors raised while fetching the policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Transport failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("policy API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a policy document.
    #[error("failed to decode policy document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request did not complete in time.
    #[error("policy request timed out after {0} seconds")]
    Timeout(u64),

    /// Reading a local policy file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No API key available.
    #[error("credentials unavailable: {0}")]
    Credentials(String),

    /// The configured endpoint could not be turned into a URL.
    #[error("invalid policy endpoint: {0}")]
    Endpoint(String),
}

/// Result type for policy client operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

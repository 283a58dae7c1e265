//! Turning a resolved group into its externally visible record.

use serde::{Deserialize, Serialize};

/// Prefix of every group identifier.
pub const ID_PREFIX: &str = "acl.groups.";

/// The record handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Stable identifier, derived from the group name alone.
    pub id: String,
    /// Members in policy order.
    pub members: Vec<String>,
}

/// Build the record for `name`.
pub fn materialize(name: &str, members: Vec<String>) -> ResolutionResult {
    ResolutionResult {
        id: format!("{}{}", ID_PREFIX, name),
        members,
    }
}

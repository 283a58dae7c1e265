//! The group read operation.

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result, ValidationError};
use crate::groups::materializer::{materialize, ResolutionResult};
use crate::groups::resolver::resolve;
use crate::observability::metrics;
use crate::policy::PolicyClient;
use crate::resilience::read_with_wait_for;

/// Inputs of a group read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuery {
    /// Exact group name, e.g. `group:eng`.
    pub name: String,
    /// Optional wait window such as `30s`; must exceed one second.
    pub wait_for: Option<String>,
}

impl GroupQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wait_for: None,
        }
    }

    pub fn wait_for(mut self, wait_for: impl Into<String>) -> Self {
        self.wait_for = Some(wait_for.into());
        self
    }
}

/// Resolve a group to its members, polling while `wait_for` allows.
pub async fn read_group<C: PolicyClient>(
    client: &C,
    query: &GroupQuery,
    cancel: CancellationToken,
) -> Result<ResolutionResult> {
    if query.name.is_empty() {
        return Err(ValidationError::new("name", "name must not be empty").into());
    }

    let name = query.name.as_str();
    tracing::debug!(group = name, wait_for = ?query.wait_for, "Reading group");

    let result = read_with_wait_for(query.wait_for.as_deref(), cancel, move || async move {
        let document = client.fetch_policy().await?;
        let members = resolve(&document, name)?;
        Ok::<_, Error>(materialize(name, members))
    })
    .await;

    match &result {
        Ok(record) => {
            metrics::record_resolution("success");
            tracing::info!(group = name, members = record.members.len(), "Group resolved");
        }
        Err(e) => {
            metrics::record_resolution(match e {
                Error::Validation(_) => "invalid",
                Error::NotFound { .. } => "not_found",
                Error::Remote(_) => "remote_error",
                Error::Cancelled => "cancelled",
            });
            tracing::warn!(group = name, error = %e, "Group read failed");
        }
    }

    result
}

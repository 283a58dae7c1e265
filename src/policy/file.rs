//! Policy documents read from the local filesystem.

use std::path::{Path, PathBuf};

use crate::policy::client::PolicyClient;
use crate::policy::types::{PolicyDocument, PolicyResult};

/// Reads a policy JSON file on every fetch.
///
/// Edits to the file between attempts are picked up by the next attempt.
#[derive(Debug, Clone)]
pub struct FilePolicyClient {
    path: PathBuf,
}

impl FilePolicyClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PolicyClient for FilePolicyClient {
    async fn fetch_policy(&self) -> PolicyResult<PolicyDocument> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        PolicyDocument::from_json(&body)
    }
}

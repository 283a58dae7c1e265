//! Group lookup within a policy document.

use crate::error::{Error, Result};
use crate::policy::PolicyDocument;

/// Look up `name` in the document's groups.
///
/// Matching is exact: no case folding or trimming. The members are returned
/// as an owned copy in document order.
pub fn resolve(document: &PolicyDocument, name: &str) -> Result<Vec<String>> {
    document
        .groups
        .get(name)
        .cloned()
        .ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })
}

//! Host-facing diagnostics.
//!
//! Converts errors into the `(severity, summary, detail, attribute path)`
//! records a configuration host shows to its user.

use std::fmt;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One reportable problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: Option<String>,
    /// Attribute the problem refers to, if any.
    pub attribute_path: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.summary)?;
        if let Some(path) = &self.attribute_path {
            write!(f, " (at {})", path)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, "\n  {}", detail)?;
        }
        Ok(())
    }
}

/// Diagnostics collected for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An error diagnostic with `message` as summary and `err` as detail.
pub fn diagnostics_error(
    err: Option<&dyn std::error::Error>,
    message: impl Into<String>,
) -> Diagnostics {
    Diagnostic {
        severity: Severity::Error,
        summary: message.into(),
        detail: err.map(|e| e.to_string()),
        attribute_path: None,
    }
    .into()
}

/// Like [`diagnostics_error`], pointing at `path`.
pub fn diagnostics_error_with_path(
    err: Option<&dyn std::error::Error>,
    message: impl Into<String>,
    path: impl Into<String>,
) -> Diagnostics {
    Diagnostic {
        severity: Severity::Error,
        summary: message.into(),
        detail: err.map(|e| e.to_string()),
        attribute_path: Some(path.into()),
    }
    .into()
}

impl From<&Error> for Diagnostics {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation(v) => {
                let mut diags = diagnostics_error_with_path(None, v.message.clone(), v.path.clone());
                if let Some(first) = diags.0.first_mut() {
                    first.detail = v.detail.clone();
                }
                diags
            }
            Error::NotFound { name } => {
                diagnostics_error(None, format!("Unable to find group {}", name))
            }
            Error::Remote(e) => diagnostics_error(Some(e), "Failed to fetch groups"),
            Error::Cancelled => diagnostics_error(None, "Read cancelled"),
        }
    }
}

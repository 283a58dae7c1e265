//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, URL scheme)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use url::Url;

use crate::config::schema::ClientConfig;
pub use crate::error::ValidationError;

/// Check a deserialized config for values serde can't rule out.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let api = &config.api;

    match Url::parse(&api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "api.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(
            ValidationError::new("api.base_url", "base_url is not a valid URL").with_detail(e),
        ),
    }

    if api.tailnet.trim().is_empty() {
        errors.push(ValidationError::new("api.tailnet", "tailnet must not be empty"));
    }

    if api.api_key_env.trim().is_empty() {
        errors.push(ValidationError::new(
            "api.api_key_env",
            "api_key_env must name an environment variable",
        ));
    }

    if api.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "api.timeout_secs",
            "timeout_secs must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!
//! API key:
//!     environment variable named by api.api_key_env
//!     → HttpPolicyClient::from_env
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an absent file means "talk to the public API"
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets never live in the file

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ApiConfig, ClientConfig, LoggingConfig};

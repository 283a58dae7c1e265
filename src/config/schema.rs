//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::policy::API_KEY_ENV_VAR;

/// Root configuration for the group reader.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Policy API connection settings.
    pub api: ApiConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Policy API connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API (scheme and host, no path).
    pub base_url: String,

    /// Tailnet name; `-` selects the tailnet the key belongs to.
    pub tailnet: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.tailscale.com".to_string(),
            tailnet: "-".to_string(),
            api_key_env: API_KEY_ENV_VAR.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "acl_groups=info".to_string(),
            json: false,
        }
    }
}

//! Policy API client with timeout and error handling.
//!
//! # Responsibilities
//! - Fetch the tailnet policy document over HTTPS
//! - Authenticate with an API key taken from the environment
//! - Bound every request with a timeout

use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use tokio::time::timeout;
use url::Url;

use crate::config::ApiConfig;
use crate::policy::types::{PolicyDocument, PolicyError, PolicyResult};

/// Default environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "TAILSCALE_API_KEY";

/// Source of policy documents.
///
/// Each call returns whatever the backend currently exposes, which may lag
/// behind recent writes.
pub trait PolicyClient {
    fn fetch_policy(&self) -> impl Future<Output = PolicyResult<PolicyDocument>> + Send;
}

/// HTTP client for the policy endpoint of the API.
#[derive(Clone)]
pub struct HttpPolicyClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    timeout_duration: Duration,
}

impl HttpPolicyClient {
    /// Create a client for the tailnet named in `config`.
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> PolicyResult<Self> {
        let endpoint = policy_endpoint(&config.base_url, &config.tailnet)?;
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(PolicyError::Credentials("API key is empty".to_string()));
        }

        tracing::debug!(
            endpoint = %endpoint,
            timeout_secs = config.timeout_secs,
            "Policy client initialized"
        );

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            timeout_duration: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Create a client, reading the API key from `config.api_key_env`.
    pub fn from_env(config: &ApiConfig) -> PolicyResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            PolicyError::Credentials(format!(
                "Environment variable {} not set",
                config.api_key_env
            ))
        })?;

        Self::new(config, api_key)
    }

    /// The URL policy documents are fetched from.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PolicyClient for HttpPolicyClient {
    async fn fetch_policy(&self) -> PolicyResult<PolicyDocument> {
        let request = self
            .http
            .get(self.endpoint.clone())
            .basic_auth(&self.api_key, Some(""))
            .header(ACCEPT, "application/json");

        // The deadline covers the body as well as the headers.
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, PolicyError>((status, body))
        };

        let (status, body) = match timeout(self.timeout_duration, exchange).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout_duration.as_secs(),
                    "Policy request timed out"
                );
                return Err(PolicyError::Timeout(self.timeout_duration.as_secs()));
            }
        };

        if !status.is_success() {
            tracing::warn!(status = %status, "Policy API returned an error status");
            return Err(PolicyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        PolicyDocument::from_json(&body)
    }
}

impl std::fmt::Debug for HttpPolicyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPolicyClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

/// `{base_url}/api/v2/tailnet/{tailnet}/acl`, with `tailnet` percent-encoded
/// as a single path segment.
fn policy_endpoint(base_url: &str, tailnet: &str) -> PolicyResult<Url> {
    let mut endpoint = Url::parse(base_url)
        .map_err(|e| PolicyError::Endpoint(format!("'{}': {}", base_url, e)))?;

    endpoint
        .path_segments_mut()
        .map_err(|_| PolicyError::Endpoint(format!("'{}' cannot be a base URL", base_url)))?
        .pop_if_empty()
        .extend(["api", "v2", "tailnet", tailnet, "acl"]);

    Ok(endpoint)
}

//! Provider Configuration
//!
//! Connection settings for the Warpgate admin API, sourced from explicit
//! values or environment variables.

use std::time::Duration;

use crate::client::Client;
use crate::error::{Error, Result};

/// Environment variable holding the Warpgate host URL.
pub const ENV_HOST: &str = "WARPGATE_HOST";
/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "WARPGATE_TOKEN";
/// Environment variable that disables TLS certificate verification.
pub const ENV_INSECURE_SKIP_VERIFY: &str = "WARPGATE_INSECURE_SKIP_VERIFY";

/// Path prefix of the admin API on a Warpgate host.
pub const ADMIN_API_PATH: &str = "/@warpgate/admin/api";

/// Provider configuration
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// The Warpgate host URL (e.g., https://warpgate.example.com)
    pub host: Option<String>,
    /// API token for authenticating with the admin API
    pub token: Option<String>,
    /// Skip TLS certificate verification when talking to the host
    pub insecure_skip_verify: bool,
    /// Per-request timeout (defaults to 30 seconds)
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Build a configuration from the `WARPGATE_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var(ENV_HOST).ok(),
            token: std::env::var(ENV_TOKEN).ok(),
            insecure_skip_verify: std::env::var(ENV_INSECURE_SKIP_VERIFY)
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
            timeout: None,
        }
    }

    /// The full admin API base URL for the configured host.
    ///
    /// The admin API path is appended unless the host already carries it.
    pub fn api_base(&self) -> Result<String> {
        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::Config("host cannot be empty".to_string()))?;

        if host.contains(ADMIN_API_PATH) {
            return Ok(host.to_string());
        }

        Ok(format!("{}{}", host.trim_end_matches('/'), ADMIN_API_PATH))
    }

    /// Construct an API client from this configuration.
    pub fn client(&self) -> Result<Client> {
        Client::new(self)
    }
}

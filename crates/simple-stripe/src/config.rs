//! Client configuration.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::StripeError;

/// Stripe API version every request is pinned to.
pub const DEFAULT_API_VERSION: &str = "2020-08-27";

/// Stripe API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Stripe client configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (`sk_test_...` or `sk_live_...`).
    pub api_key: String,

    /// Value of the `Stripe-Version` header (default: "2020-08-27").
    pub api_version: String,

    /// API base URL, without trailing slash (default: `<https://api.stripe.com/v1>`).
    pub base_url: String,

    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

/// Stripe secrets file structure.
#[derive(Debug, Deserialize)]
struct StripeSecrets {
    api_key: String,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

impl StripeConfig {
    /// Configuration with default version, base URL and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Override the base URL (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the pinned API version.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Load configuration from a secrets file, falling back to environment variables.
    ///
    /// Environment variables: `STRIPE_API_KEY` (required), `STRIPE_API_VERSION`,
    /// `STRIPE_BASE_URL`, `STRIPE_TIMEOUT_SECONDS`.
    pub fn from_env() -> Result<Self, StripeError> {
        let secret_paths = [".secrets/stripe.json", "../.secrets/stripe.json"];

        for path in &secret_paths {
            if Path::new(path).exists() {
                let config = Self::from_secrets_file(path)?;
                tracing::info!(path = %path, "Loaded Stripe secrets from file");
                return Ok(config);
            }
        }

        tracing::debug!("Stripe secrets file not found, using environment variables");
        let api_key = std::env::var("STRIPE_API_KEY")
            .map_err(|_| StripeError::Configuration("STRIPE_API_KEY is not set".into()))?;

        let mut config = Self::new(api_key);
        if let Ok(version) = std::env::var("STRIPE_API_VERSION") {
            config = config.with_api_version(version);
        }
        if let Ok(base_url) = std::env::var("STRIPE_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Some(timeout) = std::env::var("STRIPE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config = config.with_timeout_seconds(timeout);
        }
        Ok(config)
    }

    /// Load configuration from a JSON secrets file.
    pub fn from_secrets_file(path: impl AsRef<Path>) -> Result<Self, StripeError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StripeError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let secrets: StripeSecrets = serde_json::from_str(&contents)?;

        if secrets.api_key.is_empty() {
            return Err(StripeError::Configuration(format!(
                "empty api_key in {}",
                path.display()
            )));
        }

        let mut config = Self::new(secrets.api_key);
        if let Some(version) = secrets.api_version {
            config = config.with_api_version(version);
        }
        if let Some(base_url) = secrets.base_url {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

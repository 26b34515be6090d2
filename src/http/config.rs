//! Client configuration
//!
//! Everything the engine needs is passed in explicitly. `from_env` and
//! `from_file` are opt-in conveniences; nothing is read implicitly.

use super::rate_limit::RateLimiterConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Base URL of the WaniKani API
pub const WANIKANI_API_URL: &str = "https://api.wanikani.com";

/// API revision sent with every request
pub const WANIKANI_REVISION: &str = "20170710";

/// Header carrying the API revision
pub const REVISION_HEADER: &str = "Wanikani-Revision";

/// Environment variable read by [`ClientConfig::from_env`]
pub const API_TOKEN_ENV: &str = "WANIKANI_API_TOKEN";

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API token sent as a bearer credential
    pub api_token: Option<String>,
    /// Scheme and host all paths are relative to
    pub base_url: String,
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Skip backoff sleeps between retries (tests only)
    pub no_retry_sleep: bool,
    /// Record requests and replay seeded responses instead of using the network
    pub record_mode: bool,
    /// Transport timeout for a single attempt
    pub timeout: Option<Duration>,
    /// Client-side rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: WANIKANI_API_URL.to_string(),
            max_retries: 0,
            no_retry_sleep: false,
            record_mode: false,
            timeout: None,
            rate_limit: None,
            user_agent: format!("wanikani-api-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Default config with the token taken from `WANIKANI_API_TOKEN`
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::config(format!("{API_TOKEN_ENV} is not set")))?;
        Ok(Self::builder().api_token(token).build())
    }

    /// Parse a YAML config document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        file.into_config()
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Whether a usable credential is configured
    pub fn has_token(&self) -> bool {
        self.api_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API token
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api_token = Some(token.into());
        self
    }

    /// Override the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Skip backoff sleeps
    pub fn no_retry_sleep(mut self, skip: bool) -> Self {
        self.config.no_retry_sleep = skip;
        self
    }

    /// Enable record mode
    pub fn record_mode(mut self, record: bool) -> Self {
        self.config.record_mode = record;
        self
    }

    /// Set the per-attempt transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

// ============================================================================
// YAML file form
// ============================================================================

/// On-disk shape of the config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    api_token: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    max_retries: u32,
    #[serde(default)]
    timeout_ms: Option<u64>,
    #[serde(default)]
    rate_limit: Option<RateLimiterConfig>,
    #[serde(default)]
    user_agent: Option<String>,
}

impl ConfigFile {
    fn into_config(self) -> Result<ClientConfig> {
        let mut builder = ClientConfig::builder().max_retries(self.max_retries);

        if let Some(token) = self.api_token {
            builder = builder.api_token(token);
        }
        if let Some(base_url) = self.base_url {
            url::Url::parse(&base_url)
                .map_err(|e| Error::invalid_config("base_url", e.to_string()))?;
            builder = builder.base_url(base_url.trim_end_matches('/'));
        }
        if let Some(ms) = self.timeout_ms {
            if ms == 0 {
                return Err(Error::invalid_config("timeout_ms", "must be greater than 0"));
            }
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(rate_limit) = self.rate_limit {
            builder = builder.rate_limit(rate_limit);
        }
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(builder.build())
    }
}

//! Client configuration
//!
//! Credentials, edge/region routing and HTTP behaviour, loadable from the
//! environment, YAML or JSON.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the account SID
pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
/// Environment variable holding the auth token
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
/// Environment variable holding the edge location
pub const ENV_EDGE: &str = "TWILIO_EDGE";
/// Environment variable holding the region
pub const ENV_REGION: &str = "TWILIO_REGION";

// ============================================================================
// Client Config
// ============================================================================

/// Everything needed to build a [`crate::Client`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub account_sid: String,
    pub auth_token: String,

    /// Basic-auth username, defaults to the account SID
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password, defaults to the auth token
    #[serde(default)]
    pub password: Option<String>,

    /// Edge location, e.g. `sydney`
    #[serde(default)]
    pub edge: Option<String>,

    /// Region, e.g. `au1`
    #[serde(default)]
    pub region: Option<String>,

    /// Appended to the user agent, space separated
    #[serde(default)]
    pub user_agent_extensions: Vec<String>,

    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub base_urls: BaseUrls,
}

impl ClientConfig {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            username: None,
            password: None,
            edge: None,
            region: None,
            user_agent_extensions: Vec::new(),
            http: HttpSettings::default(),
            base_urls: BaseUrls::default(),
        }
    }

    /// Load from `TWILIO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any variable source, e.g. a map in tests
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let account_sid = lookup(ENV_ACCOUNT_SID)
            .none_if_empty()
            .ok_or_else(|| Error::missing_field(ENV_ACCOUNT_SID))?;
        let auth_token = lookup(ENV_AUTH_TOKEN)
            .none_if_empty()
            .ok_or_else(|| Error::missing_field(ENV_AUTH_TOKEN))?;

        let mut config = Self::new(account_sid, auth_token);
        config.edge = lookup(ENV_EDGE).none_if_empty();
        config.region = lookup(ENV_REGION).none_if_empty();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check that credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.account_sid.trim().is_empty() {
            return Err(Error::missing_field("account_sid"));
        }
        if self.auth_token.trim().is_empty() {
            return Err(Error::missing_field("auth_token"));
        }
        Ok(())
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn edge(mut self, edge: impl Into<String>) -> Self {
        self.edge = Some(edge.into());
        self
    }

    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn user_agent_extension(mut self, extension: impl Into<String>) -> Self {
        self.user_agent_extensions.push(extension.into());
        self
    }

    #[must_use]
    pub fn http(mut self, http: HttpSettings) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn base_urls(mut self, base_urls: BaseUrls) -> Self {
        self.base_urls = base_urls;
        self
    }

    /// Basic auth credentials for every request
    pub fn auth(&self) -> AuthConfig {
        let username = self
            .username
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| self.account_sid.clone());
        let password = self
            .password
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| self.auth_token.clone());
        AuthConfig::basic(username, password)
    }

    /// HTTP layer config, user agent extensions included
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut config = self.http.to_client_config();
        if !self.user_agent_extensions.is_empty() {
            config.user_agent = format!(
                "{} {}",
                config.user_agent,
                self.user_agent_extensions.join(" ")
            );
        }
        config
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// Serializable HTTP behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_type: BackoffType,
    /// Client-side request rate; unset disables the limiter
    pub requests_per_second: Option<u32>,
    pub burst_size: Option<u32>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        let defaults = RateLimiterConfig::default();
        Self {
            timeout_secs: 30,
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 60_000,
            backoff_type: BackoffType::Exponential,
            requests_per_second: Some(defaults.requests_per_second),
            burst_size: Some(defaults.burst_size),
        }
    }
}

impl HttpSettings {
    pub fn to_client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff_type,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        let builder = match self.requests_per_second {
            Some(rps) => builder.rate_limit(self.burst_size.map_or_else(
                || RateLimiterConfig::per_account(rps),
                |burst| RateLimiterConfig::new(rps, burst),
            )),
            None => builder.no_rate_limit(),
        };
        builder.build()
    }
}

impl From<&HttpSettings> for HttpClientConfig {
    fn from(settings: &HttpSettings) -> Self {
        settings.to_client_config()
    }
}

// ============================================================================
// Base URLs
// ============================================================================

/// Domain base URLs, before any edge/region rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseUrls {
    pub api: String,
    pub preview: String,
    pub taskrouter: String,
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self {
            api: "https://api.twilio.com".to_string(),
            preview: "https://preview.twilio.com".to_string(),
            taskrouter: "https://taskrouter.twilio.com".to_string(),
        }
    }
}

impl BaseUrls {
    /// Point every domain at one host, e.g. a mock server
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            api: base_url.clone(),
            preview: base_url.clone(),
            taskrouter: base_url,
        }
    }
}

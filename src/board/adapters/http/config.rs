//! Configuration for the HTTP sync gateway.

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "TASKFORGE_API_URL";
/// Environment variable holding an optional bearer token.
pub const API_TOKEN_ENV: &str = "TASKFORGE_API_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const API_TIMEOUT_ENV: &str = "TASKFORGE_API_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while building gateway configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL did not parse or cannot carry path segments.
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// Rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingVariable(&'static str),

    /// The timeout was not a positive whole number of seconds.
    #[error("invalid request timeout '{0}', expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Settings for [`super::HttpSyncGateway`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskforge::board::adapters::http::HttpGatewayConfig;
///
/// let config = HttpGatewayConfig::new("https://tasks.example.com/api")
///     .expect("valid base URL")
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.timeout(), Duration::from_secs(3));
/// assert!(config.bearer_token().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    base_url: Url,
    timeout: Duration,
    bearer_token: Option<String>,
}

impl HttpGatewayConfig {
    /// Creates a configuration with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the URL does not parse or
    /// cannot be a base for endpoint paths.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            value: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_owned()));
        }
        Ok(Self {
            base_url: parsed,
            timeout: DEFAULT_TIMEOUT,
            bearer_token: None,
        })
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is missing or a value is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, keyed by the `TASKFORGE_API_*`
    /// variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is missing or a value is
    /// malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_ENV).ok_or(ConfigError::MissingVariable(API_URL_ENV))?;
        let mut config = Self::new(&base_url)?;
        if let Some(raw) = lookup(API_TIMEOUT_ENV) {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(seconds);
        }
        if let Some(token) = lookup(API_TOKEN_ENV).filter(|token| !token.trim().is_empty()) {
            config.bearer_token = Some(token.trim().to_owned());
        }
        Ok(config)
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the bearer token, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Builds the URL of an endpoint below the base URL.
    ///
    /// Each segment is percent-encoded, so identifiers cannot escape their
    /// path position.
    #[must_use]
    pub fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

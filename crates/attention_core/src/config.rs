//! Engine configuration.
//!
//! # Responsibility
//! - Hold the tunables of one engine instance (origin, throttle, query).
//! - Validate them once at load time so the cycle never re-checks.
//!
//! # Invariants
//! - A `NotifierConfig` returned by `from_json_*` has passed `validate()`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use url::Url;

/// Minimum spacing between two full check cycles (five minutes).
pub const DEFAULT_THROTTLE_INTERVAL_MS: u64 = 5 * 60 * 1000;
/// Remote query selecting items awaiting the caller's attention.
pub const DEFAULT_QUERY: &str = "attention:self";
pub const DEFAULT_QUERY_LIMIT: u32 = 25;
/// Hex option bitmask requesting the detail fields the filter needs.
pub const DEFAULT_QUERY_OPTIONS: &str = "1000081";
pub const DEFAULT_DASHBOARD_PATH: &str = "/dashboard/self";

const MAX_QUERY_LIMIT: u32 = 500;

/// Configuration for one notification engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Absolute base URL of the remote system, e.g. `https://review.example`.
    pub origin: String,
    pub throttle_interval_ms: u64,
    pub query: String,
    pub query_limit: u32,
    pub query_options: String,
    pub dashboard_path: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_string(),
            throttle_interval_ms: DEFAULT_THROTTLE_INTERVAL_MS,
            query: DEFAULT_QUERY.to_string(),
            query_limit: DEFAULT_QUERY_LIMIT,
            query_options: DEFAULT_QUERY_OPTIONS.to_string(),
            dashboard_path: DEFAULT_DASHBOARD_PATH.to_string(),
        }
    }
}

impl NotifierConfig {
    /// Creates a default configuration for the given origin.
    pub fn for_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Validates field-level invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.origin_url()?;

        if self.throttle_interval_ms == 0 {
            return Err(ConfigError::InvalidThrottleInterval);
        }
        if self.query.trim().is_empty() {
            return Err(ConfigError::EmptyQuery);
        }
        if self.query_limit == 0 || self.query_limit > MAX_QUERY_LIMIT {
            return Err(ConfigError::InvalidQueryLimit(self.query_limit));
        }
        if self.query_options.is_empty()
            || !self.query_options.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::InvalidQueryOptions(self.query_options.clone()));
        }
        if !self.dashboard_path.starts_with('/') {
            return Err(ConfigError::InvalidDashboardPath(
                self.dashboard_path.clone(),
            ));
        }
        Ok(())
    }

    /// Parsed origin; only `http` and `https` are accepted.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.origin.trim())
            .map_err(|err| ConfigError::InvalidOrigin(format!("{}: {err}", self.origin)))?;
        if matches!(url.scheme(), "http" | "https") && url.has_host() {
            Ok(url)
        } else {
            Err(ConfigError::InvalidOrigin(self.origin.clone()))
        }
    }

    /// Origin string without a trailing slash, used as the state record key.
    pub fn origin_key(&self) -> String {
        self.origin.trim().trim_end_matches('/').to_string()
    }
}

/// Configuration load/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    InvalidOrigin(String),
    InvalidThrottleInterval,
    EmptyQuery,
    InvalidQueryLimit(u32),
    InvalidQueryOptions(String),
    InvalidDashboardPath(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(message) => write!(f, "cannot read config: {message}"),
            Self::Parse(message) => write!(f, "cannot parse config: {message}"),
            Self::InvalidOrigin(value) => {
                write!(f, "origin must be an absolute http(s) URL: {value}")
            }
            Self::InvalidThrottleInterval => write!(f, "throttle_interval_ms must be > 0"),
            Self::EmptyQuery => write!(f, "query must not be empty"),
            Self::InvalidQueryLimit(value) => {
                write!(f, "query_limit must be in 1..={MAX_QUERY_LIMIT}, got {value}")
            }
            Self::InvalidQueryOptions(value) => {
                write!(f, "query_options must be a hex bitmask, got `{value}`")
            }
            Self::InvalidDashboardPath(value) => {
                write!(f, "dashboard_path must start with `/`, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotifierConfig, DEFAULT_QUERY_LIMIT, DEFAULT_THROTTLE_INTERVAL_MS};

    #[test]
    fn missing_fields_take_defaults() {
        let config =
            NotifierConfig::from_json_str(r#"{"origin": "https://review.example/"}"#).unwrap();
        assert_eq!(config.throttle_interval_ms, DEFAULT_THROTTLE_INTERVAL_MS);
        assert_eq!(config.query_limit, DEFAULT_QUERY_LIMIT);
        assert_eq!(config.origin_key(), "https://review.example");
    }

    #[test]
    fn rejects_non_http_origin() {
        let err = NotifierConfig::from_json_str(r#"{"origin": "ftp://review.example"}"#)
            .expect_err("ftp origin must fail");
        assert!(matches!(err, ConfigError::InvalidOrigin(_)));

        let err = NotifierConfig::for_origin("not a url")
            .validate()
            .expect_err("garbage origin must fail");
        assert!(matches!(err, ConfigError::InvalidOrigin(_)));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut config = NotifierConfig::for_origin("https://review.example");
        config.throttle_interval_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidThrottleInterval)
        );

        let mut config = NotifierConfig::for_origin("https://review.example");
        config.query_limit = 501;
        assert_eq!(config.validate(), Err(ConfigError::InvalidQueryLimit(501)));

        let mut config = NotifierConfig::for_origin("https://review.example");
        config.query_options = "zz".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidQueryOptions(_))
        ));

        let mut config = NotifierConfig::for_origin("https://review.example");
        config.dashboard_path = "dashboard".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDashboardPath(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = NotifierConfig::from_json_str("{").expect_err("bad json must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

//! Client configuration resolved from the environment.

use std::env;
use std::time::Duration;

use reqwest::Url;
use tracing::warn;

use crate::ApiError;

/// Environment variable overriding the back office base URL.
pub const API_BASE_ENV: &str = "YOUSMALA_API_BASE";
/// Environment variable overriding the request timeout, in whole seconds.
pub const API_TIMEOUT_ENV: &str = "YOUSMALA_API_TIMEOUT_SECS";
/// Base URL used when no override is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:88";
/// Request timeout used when no override is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hostnames allowed to use plain HTTP.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Resolve the configuration from `YOUSMALA_API_BASE` and
    /// `YOUSMALA_API_TIMEOUT_SECS`, falling back to the defaults.
    ///
    /// An unparsable timeout is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = env::var(API_BASE_ENV)
            && !base.trim().is_empty()
        {
            config = config.with_base_url(base);
        }
        if let Ok(raw_timeout) = env::var(API_TIMEOUT_ENV) {
            match raw_timeout.trim().parse::<u64>() {
                Ok(seconds) if seconds > 0 => config.timeout = Duration::from_secs(seconds),
                _ => warn!(value = %raw_timeout, "ignoring invalid {}; using default timeout", API_TIMEOUT_ENV),
            }
        }
        config
    }

    /// Replace the base URL, trimming surrounding whitespace and a trailing `/`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Validate that the base URL is acceptable for use by the client.
    ///
    /// Rules:
    /// - `localhost` or `127.0.0.1`: any scheme is allowed
    /// - otherwise: scheme must be HTTPS
    pub fn validate(&self) -> Result<(), ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            base: self.base_url.clone(),
            reason,
        };
        let parsed = Url::parse(&self.base_url).map_err(|error| invalid(error.to_string()))?;
        let host_name = parsed.host_str().ok_or_else(|| invalid("missing host".to_string()))?;

        if LOCALHOST_DOMAINS
            .iter()
            .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
        {
            return Ok(());
        }

        if parsed.scheme() != "https" {
            return Err(invalid(format!(
                "non-localhost hosts must use https; got '{}://'",
                parsed.scheme()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_back_office() {
        temp_env::with_vars_unset([API_BASE_ENV, API_TIMEOUT_ENV], || {
            let config = ApiConfig::from_env();
            assert_eq!(config.base_url, "http://localhost:88");
            assert_eq!(config.timeout, Duration::from_secs(30));
        });
    }

    #[test]
    fn environment_overrides_base_and_timeout() {
        temp_env::with_vars(
            [
                (API_BASE_ENV, Some("https://backoffice.example.com/api/")),
                (API_TIMEOUT_ENV, Some("5")),
            ],
            || {
                let config = ApiConfig::from_env();
                assert_eq!(config.base_url, "https://backoffice.example.com/api");
                assert_eq!(config.timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn invalid_timeout_keeps_default() {
        temp_env::with_vars([(API_BASE_ENV, None), (API_TIMEOUT_ENV, Some("soon"))], || {
            assert_eq!(ApiConfig::from_env().timeout, DEFAULT_TIMEOUT);
        });
    }

    #[test]
    fn localhost_may_use_plain_http() {
        assert!(ApiConfig::default().with_base_url("http://127.0.0.1:8080").validate().is_ok());
    }

    #[test]
    fn remote_hosts_require_https() {
        let error = ApiConfig::default()
            .with_base_url("http://backoffice.example.com")
            .validate()
            .expect_err("plain http to a remote host is rejected");
        assert!(error.to_string().contains("https"), "error: {}", error);
        assert!(ApiConfig::default().with_base_url("https://backoffice.example.com").validate().is_ok());
    }

    #[test]
    fn unparsable_base_is_rejected() {
        assert!(matches!(
            ApiConfig::default().with_base_url("not a url").validate(),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }
}

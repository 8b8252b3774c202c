use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the backend lives and how long a single request may take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read `HIVE_BACKEND_URL` and `HIVE_REQUEST_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` when the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("HIVE_BACKEND_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.into());

        let mut config = Self::new(base_url.trim());
        if let Ok(raw) = env::var("HIVE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = parse_timeout_secs(&raw)?;
        }
        Ok(config)
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidTimeout` for zero, negative or non-numeric input.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            raw: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn timeout_parses_positive_seconds() {
        assert_eq!(parse_timeout_secs(" 30 ").unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn timeout_rejects_zero_and_garbage() {
        assert!(matches!(
            parse_timeout_secs("0"),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            parse_timeout_secs("soon"),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }
}

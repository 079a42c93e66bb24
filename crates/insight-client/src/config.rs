//! Configuration for the analysis backend endpoint

use crate::error::{ClientError, Result};
use std::time::Duration;
use url::Url;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const DEFAULT_ANALYSIS_PATH: &str = "/api/chat";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the analysis client
///
/// One configurable endpoint; the `/api/report` variant of the backend is
/// reachable by overriding the analysis path, and both response shapes
/// normalize the same way downstream.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (default: `http://127.0.0.1:8000`)
    pub api_base: String,

    /// Path of the analysis endpoint (default: `/api/chat`)
    pub analysis_path: String,

    /// Request timeout; a hung request resolves as a transport error
    /// instead of leaving the lifecycle in `Loading`
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            analysis_path: DEFAULT_ANALYSIS_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config from environment variables
    ///
    /// Reads `INSIGHT_API_BASE` and `INSIGHT_ANALYSIS_PATH` when set,
    /// falling back to the defaults otherwise.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("INSIGHT_API_BASE") {
            config = config.with_api_base(base);
        }
        if let Ok(path) = std::env::var("INSIGHT_ANALYSIS_PATH") {
            config = config.with_analysis_path(path);
        }
        config
    }

    /// Set the backend base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the analysis endpoint path
    pub fn with_analysis_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.analysis_path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = Duration::from_secs(timeout_secs);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| ClientError::Config(format!("invalid api_base '{}': {e}", self.api_base)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "api_base must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Config("timeout must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Full URL of the analysis endpoint
    pub fn analysis_url(&self) -> String {
        format!("{}{}", self.api_base, self.analysis_path)
    }

    /// Full URL of the backend liveness probe
    pub fn health_url(&self) -> String {
        format!("{}/health", self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.analysis_url(), "http://127.0.0.1:8000/api/chat");
        assert_eq!(config.health_url(), "http://127.0.0.1:8000/health");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_normalizes_slashes() {
        let config = ClientConfig::new()
            .with_api_base("http://analysis.internal:9000/")
            .with_analysis_path("api/report");
        assert_eq!(
            config.analysis_url(),
            "http://analysis.internal:9000/api/report"
        );
    }

    #[test]
    fn test_validate_rejects_bad_base() {
        let config = ClientConfig::new().with_api_base("not a url");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));

        let config = ClientConfig::new().with_api_base("ftp://example.com");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig::new().with_timeout(0);
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }
}

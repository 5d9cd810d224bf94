//! Fetcher configuration
//!
//! Loaded from YAML or JSON, every field optional. Environment variables
//! override the throttle interval and the page bound.

use crate::endpoints::ApiHosts;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, ThrottleConfig};
use crate::pagination::{PaginationConfig, DEFAULT_MAX_PAGES};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "LISTING_FETCHER_CONFIG";

/// Overrides the throttle with a fixed interval in milliseconds
pub const THROTTLE_MS_ENV: &str = "LISTING_FETCHER_THROTTLE_MS";

/// Overrides the page bound; `0` or `none` removes it
pub const MAX_PAGES_ENV: &str = "LISTING_FETCHER_MAX_PAGES";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete fetcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Service base URLs
    pub hosts: ApiHosts,

    /// Pause policy applied after each call
    pub throttle: ThrottleConfig,

    /// Page bound per collection; `null` for unbounded
    pub max_pages: Option<u32>,

    /// Transport settings
    pub http: HttpConfig,

    /// Default region for category and attribute lookups
    pub region_code: String,

    /// Default language for category and attribute lookups
    pub language_code: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            hosts: ApiHosts::default(),
            throttle: ThrottleConfig::default(),
            max_pages: Some(DEFAULT_MAX_PAGES),
            http: HttpConfig::default(),
            region_code: "US".to_string(),
            language_code: "en".to_string(),
        }
    }
}

/// Transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent string
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Transport config with defaults filled in
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

impl FetcherConfig {
    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml" | "yml") | None => serde_yaml::from_str(&content)?,
            Some(other) => {
                return Err(Error::config(format!(
                    "unsupported config extension '{other}' (expected yaml, yml or json)"
                )))
            }
        };
        Self::validated(config)
    }

    /// Parse from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::validated(serde_yaml::from_str(content)?)
    }

    fn validated(mut config: Self) -> Result<Self> {
        config.hosts.validate()?;
        // Zero means unbounded, same as the environment override
        config.max_pages = config.max_pages.filter(|&max| max > 0);
        if config.http.timeout_secs == 0 {
            return Err(Error::config("http.timeout_secs must be greater than zero"));
        }
        Ok(config)
    }

    /// Apply environment overrides
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var(THROTTLE_MS_ENV).ok().as_deref(),
            std::env::var(MAX_PAGES_ENV).ok().as_deref(),
        )
    }

    /// Apply raw override values as they would come from the environment
    pub fn with_overrides(
        mut self,
        throttle_ms: Option<&str>,
        max_pages: Option<&str>,
    ) -> Result<Self> {
        if let Some(raw) = throttle_ms {
            let interval_ms = raw.trim().parse::<u64>().map_err(|_| {
                Error::config(format!("{THROTTLE_MS_ENV} must be an integer, got '{raw}'"))
            })?;
            self.throttle = ThrottleConfig::FixedInterval { interval_ms };
        }

        if let Some(raw) = max_pages {
            self.max_pages = match raw.trim() {
                "0" | "none" | "" => None,
                value => Some(value.parse::<u32>().map_err(|_| {
                    Error::config(format!("{MAX_PAGES_ENV} must be an integer, got '{raw}'"))
                })?),
            };
        }

        Ok(self)
    }

    /// Pagination bounds derived from this config
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            max_pages: self.max_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RateLimiterConfig;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.throttle, ThrottleConfig::FixedInterval { interval_ms: 1000 });
        assert_eq!(config.max_pages, Some(DEFAULT_MAX_PAGES));
        assert_eq!(config.region_code, "US");
        assert_eq!(config.language_code, "en");
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = FetcherConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, FetcherConfig::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
hosts:
  account_management: http://localhost:8080/v1
  legacy: http://localhost:8080/v4
throttle:
  kind: token_bucket
  requests_per_second: 2
  burst_size: 1
max_pages: 50
http:
  timeout_secs: 5
  user_agent: custom/1.0
region_code: GB
language_code: en-GB
";
        let config = FetcherConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.hosts.account_management, "http://localhost:8080/v1");
        assert_eq!(config.hosts.legacy, "http://localhost:8080/v4");
        assert_eq!(
            config.hosts.place_actions,
            ApiHosts::default().place_actions
        );
        assert_eq!(
            config.throttle,
            ThrottleConfig::TokenBucket(RateLimiterConfig::new(2, 1))
        );
        assert_eq!(config.max_pages, Some(50));
        assert_eq!(config.region_code, "GB");

        let client = config.http.client_config();
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.user_agent, "custom/1.0");
    }

    #[test]
    fn test_null_max_pages_is_unbounded() {
        let config = FetcherConfig::from_yaml_str("max_pages: null").unwrap();
        assert_eq!(config.pagination(), PaginationConfig::unbounded());
    }

    #[test]
    fn test_zero_max_pages_matches_env_override() {
        let from_yaml = FetcherConfig::from_yaml_str("max_pages: 0").unwrap();
        assert_eq!(from_yaml.max_pages, None);
        assert_eq!(from_yaml.pagination(), PaginationConfig::unbounded());

        let from_env = FetcherConfig::default()
            .with_overrides(None, Some("0"))
            .unwrap();
        assert_eq!(from_yaml.pagination(), from_env.pagination());
    }

    #[test]
    fn test_invalid_host_rejected() {
        let err = FetcherConfig::from_yaml_str("hosts:\n  legacy: nope\n").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = FetcherConfig::from_yaml_str("http:\n  timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"max_pages": 3, "throttle": {{"kind": "none"}}}}"#).unwrap();

        let config = FetcherConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_pages, Some(3));
        assert_eq!(config.throttle, ThrottleConfig::None);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "region_code: DE").unwrap();

        let config = FetcherConfig::from_file(file.path()).unwrap();
        assert_eq!(config.region_code, "DE");
    }

    #[test]
    fn test_missing_file() {
        let err = FetcherConfig::from_file("/nonexistent/fetcher.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = FetcherConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_overrides() {
        let config = FetcherConfig::default()
            .with_overrides(Some("0"), Some("25"))
            .unwrap();
        assert_eq!(config.throttle, ThrottleConfig::FixedInterval { interval_ms: 0 });
        assert_eq!(config.max_pages, Some(25));

        let config = FetcherConfig::default()
            .with_overrides(None, Some("none"))
            .unwrap();
        assert_eq!(config.max_pages, None);
        assert_eq!(config.throttle, ThrottleConfig::default());
    }

    #[test]
    fn test_bad_overrides() {
        assert!(FetcherConfig::default()
            .with_overrides(Some("fast"), None)
            .is_err());
        assert!(FetcherConfig::default()
            .with_overrides(None, Some("-1"))
            .is_err());
    }
}

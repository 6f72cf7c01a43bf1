//! Client configuration
//!
//! Loaded from a YAML or JSON file (picked by extension), then overlaid
//! with environment variables:
//!
//! | Variable | Overrides |
//! |---|---|
//! | `CRM_BASE_URL` | `base_url` |
//! | `CRM_ACCESS_TOKEN` | `auth` (as a bearer token) |
//!
//! ```yaml
//! base_url: https://api.hubapi.com
//! auth:
//!   type: bearer
//!   token: pat-na1-...
//! http:
//!   timeout_secs: 30
//!   max_retries: 3
//!   backoff: exponential
//!   rate_limit_rps: 10
//! ```

use crate::auth::AuthConfig;
use crate::client::CrmClient;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig, RetryPolicy, DEFAULT_BASE_URL};
use crate::types::{BackoffType, StringMap};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "CRM_BASE_URL";

/// Environment variable supplying a bearer token
pub const ENV_ACCESS_TOKEN: &str = "CRM_ACCESS_TOKEN";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmConfig {
    /// API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth: AuthConfig::default(),
            http: HttpSettings::default(),
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client configuration as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff strategy
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,

    /// Requests per second; 0 disables rate limiting
    #[serde(default = "default_rate_limit_rps")]
    pub rate_limit_rps: u32,

    /// Token bucket size; defaults to `rate_limit_rps`
    #[serde(default)]
    pub rate_limit_burst: Option<u32>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    60_000
}

fn default_rate_limit_rps() -> u32 {
    10
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            rate_limit_rps: default_rate_limit_rps(),
            rate_limit_burst: None,
            user_agent: None,
            headers: StringMap::new(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl CrmConfig {
    /// Load from a YAML (`.yaml`/`.yml`) or JSON (anything else) file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            read => read
                .with_context(|| format!("Failed to read config file '{}'", path.display()))?,
        };

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        debug!("Loading config from {}", path.display());
        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Parse from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup
    #[must_use]
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|v| !v.is_empty()) {
            self.auth = AuthConfig::bearer(token);
        }
        self
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }

        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be positive"));
        }

        if self.http.initial_backoff_ms > self.http.max_backoff_ms {
            return Err(Error::invalid_value(
                "http.initial_backoff_ms",
                "must not exceed http.max_backoff_ms",
            ));
        }

        Ok(())
    }

    /// HTTP client configuration for these settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let http = &self.http;
        let rate_limit = (http.rate_limit_rps > 0).then(|| {
            RateLimiterConfig::new(
                http.rate_limit_rps,
                http.rate_limit_burst.unwrap_or(http.rate_limit_rps),
            )
        });
        let defaults = HttpClientConfig::default();

        HttpClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(http.timeout_secs),
            retry: RetryPolicy {
                max_retries: http.max_retries,
                backoff: http.backoff,
                initial_backoff: Duration::from_millis(http.initial_backoff_ms),
                max_backoff: Duration::from_millis(http.max_backoff_ms),
            },
            rate_limit,
            default_headers: http.headers.clone(),
            user_agent: http.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    /// Build a client over the HTTP transport
    pub fn build_client(&self) -> Result<CrmClient> {
        self.validate()?;
        debug!(
            "Building client for {} (auth: {})",
            self.base_url,
            self.auth.kind()
        );
        CrmClient::with_http(self.http_client_config(), self.auth.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CrmConfig::default();
        assert_eq!(config.base_url, "https://api.hubapi.com");
        assert!(config.auth.is_none());
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.rate_limit_rps, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml() {
        let config = CrmConfig::from_yaml_str(
            r"
base_url: https://api.example.com
auth:
  type: bearer
  token: pat-na1-abc
http:
  max_retries: 5
  backoff: linear
  rate_limit_rps: 0
  headers:
    X-Team: growth
",
        )
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.auth, AuthConfig::bearer("pat-na1-abc"));
        assert_eq!(config.http.max_retries, 5);
        assert_eq!(config.http.backoff, BackoffType::Linear);
        assert_eq!(config.http.timeout_secs, 30);

        let http = config.http_client_config();
        assert_eq!(http.base_url, "https://api.example.com");
        assert_eq!(http.retry.max_retries, 5);
        assert_eq!(http.retry.backoff, BackoffType::Linear);
        assert!(http.rate_limit.is_none());
        assert_eq!(
            http.default_headers.get("X-Team"),
            Some(&"growth".to_string())
        );
    }

    #[test]
    fn test_rate_limit_burst_defaults_to_rps() {
        let config =
            CrmConfig::from_json_str(r#"{ "http": { "rate_limit_rps": 4 } }"#).unwrap();
        let http = config.http_client_config();
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::new(4, 4)));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let err = CrmConfig::from_json_str(r#"{ "base_url": "" }"#).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));

        let err = CrmConfig::from_json_str(r#"{ "base_url": "not a url" }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = CrmConfig::from_json_str(r#"{ "base_url": "ftp://files.example.com" }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_http_settings() {
        let err = CrmConfig::from_json_str(r#"{ "http": { "timeout_secs": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("http.timeout_secs"));

        let err = CrmConfig::from_json_str(
            r#"{ "http": { "initial_backoff_ms": 5000, "max_backoff_ms": 100 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("http.initial_backoff_ms"));
    }

    #[test]
    fn test_env_overlay() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_ACCESS_TOKEN, "pat-from-env"),
        ]
        .into_iter()
        .collect();

        let config =
            CrmConfig::default().with_env_from(|key| env.get(key).map(|v| (*v).to_string()));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.auth, AuthConfig::bearer("pat-from-env"));

        let untouched = CrmConfig::default().with_env_from(|_| Some(String::new()));
        assert_eq!(untouched, CrmConfig::default());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("crm.yml");
        let mut file = std::fs::File::create(&yaml_path).unwrap();
        writeln!(file, "base_url: https://yaml.example.com").unwrap();
        assert_eq!(
            CrmConfig::load(&yaml_path).unwrap().base_url,
            "https://yaml.example.com"
        );

        let json_path = dir.path().join("crm.json");
        std::fs::write(&json_path, r#"{ "base_url": "https://json.example.com" }"#).unwrap();
        assert_eq!(
            CrmConfig::load(&json_path).unwrap().base_url,
            "https://json.example.com"
        );

        let err = CrmConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_load_unreadable_path_keeps_io_cause() {
        let dir = tempfile::tempdir().unwrap();

        let err = CrmConfig::load(dir.path()).unwrap_err();
        match err {
            Error::Other(message) => {
                assert!(message.starts_with("Failed to read config file '"));
                assert!(message.contains(&dir.path().display().to_string()));
            }
            other => panic!("Expected Other, got {other:?}"),
        }
    }

    #[test]
    fn test_build_client() {
        let config = CrmConfig::default();
        assert!(config.build_client().is_ok());
    }
}

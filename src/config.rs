//! # Client Configuration
//!
//! Settings for the SportsGateway client and `sgw-cli`, read from defaults,
//! an optional TOML file and `SGW_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::cache::settings::DEFAULT_CONNECT_TIMEOUT;
use crate::environment::{
    EnvironmentStore, BASE_AUTH, BASE_URL, CACHE_EXPIRES, CACHE_HOST, CACHE_PORT,
};
use crate::errors::{SgwError, SgwResult};
use crate::http::retry::{DEFAULT_BACKOFF_STEP, DEFAULT_MAX_ATTEMPTS};
use crate::http::{HttpSettings, RetryPolicy, DEFAULT_TIMEOUT};
use crate::logging::LoggingConfig;

/// Client configuration
///
/// The five connection keys accept the camelCase spelling as well
/// (`baseUrl`, `cacheExpires`, ...).
///
/// ```rust
/// use sgw_client::config::ClientConfig;
///
/// let config: ClientConfig = toml::from_str(r#"
///     baseUrl = "https://api.test"
///     baseAuth = "Basic abc"
///     cacheExpires = 60
/// "#).unwrap();
/// assert_eq!(config.base_url.as_deref(), Some("https://api.test"));
/// assert_eq!(config.timeout_seconds, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(alias = "baseUrl")]
    pub base_url: Option<String>,
    /// Raw `Authorization` header value
    #[serde(alias = "baseAuth")]
    pub base_auth: Option<String>,
    #[serde(alias = "cacheHost")]
    pub cache_host: Option<String>,
    /// Falls back to the backend's default port when unset
    #[serde(alias = "cachePort")]
    pub cache_port: Option<u16>,
    /// Cache TTL in seconds (300 when unset)
    #[serde(alias = "cacheExpires")]
    pub cache_expires: Option<u64>,
    pub timeout_seconds: u64,
    /// Total attempts per request, first try included
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
    /// Store failed responses in the cache as well as successful ones
    pub cache_failures: bool,
    pub cache_connect_timeout_seconds: u64,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            base_auth: None,
            cache_host: None,
            cache_port: None,
            cache_expires: None,
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff_ms: DEFAULT_BACKOFF_STEP.as_millis() as u64,
            cache_failures: true,
            cache_connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT.as_secs(),
            log_dir: None,
            log_level: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Precedence (highest to lowest):
    /// 1. `SGW_*` environment variables
    /// 2. First config file found (`./sgw-client.toml`,
    ///    `./config/sgw-client.toml`, `<config dir>/sgw/client.toml`)
    /// 3. Default values
    pub fn load() -> SgwResult<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                debug!("Loading config from: {}", path.display());
                Self::load_from_file(&path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        debug!(base_url = ?config.base_url, "Loaded client configuration");
        Ok(config)
    }

    /// Load configuration from a specific file, then apply `SGW_*` overrides
    pub fn load_from(path: &Path) -> SgwResult<Self> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse one TOML file, without environment overrides
    pub fn load_from_file(path: &Path) -> SgwResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SgwError::config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| SgwError::config(format!("Failed to parse config file: {e}")))
    }

    fn find_config_file() -> Option<PathBuf> {
        let mut candidates = vec![
            PathBuf::from("./sgw-client.toml"),
            PathBuf::from("./config/sgw-client.toml"),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("sgw").join("client.toml"));
        }

        candidates.into_iter().find(|p| p.is_file())
    }

    /// Apply environment variable overrides; unparseable numbers are ignored
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SGW_BASE_URL") {
            self.base_url = Some(url);
        }
        if let Ok(auth) = std::env::var("SGW_BASE_AUTH") {
            self.base_auth = Some(auth);
        }
        if let Ok(host) = std::env::var("SGW_CACHE_HOST") {
            self.cache_host = Some(host);
        }
        if let Some(port) = env_parse("SGW_CACHE_PORT") {
            self.cache_port = Some(port);
        }
        if let Some(expires) = env_parse("SGW_CACHE_EXPIRES") {
            self.cache_expires = Some(expires);
        }
        if let Some(timeout) = env_parse("SGW_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout;
        }
        if let Some(attempts) = env_parse("SGW_MAX_ATTEMPTS") {
            self.max_attempts = attempts;
        }
        if let Some(cache_failures) = env_parse("SGW_CACHE_FAILURES") {
            self.cache_failures = cache_failures;
        }
        if let Ok(dir) = std::env::var("SGW_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn validate(&self) -> SgwResult<()> {
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.is_empty()) {
            Url::parse(url).map_err(|e| SgwError::config(format!("Invalid base URL '{url}': {e}")))?;
        }
        if self.max_attempts == 0 {
            return Err(SgwError::config("max_attempts must be at least 1"));
        }
        if self.timeout_seconds == 0 {
            return Err(SgwError::config("timeout_seconds must be at least 1"));
        }
        if self.cache_expires == Some(0) {
            return Err(SgwError::config("cache_expires must be at least 1"));
        }
        Ok(())
    }

    /// Write the connection keys into `env`.
    ///
    /// Returns `false` if any key was already set there.
    pub fn seed(&self, env: &EnvironmentStore) -> bool {
        let mut fresh = true;
        if let Some(url) = &self.base_url {
            fresh &= env.set(BASE_URL, url.as_str());
        }
        if let Some(auth) = &self.base_auth {
            fresh &= env.set(BASE_AUTH, auth.as_str());
        }
        if let Some(host) = &self.cache_host {
            fresh &= env.set(CACHE_HOST, host.as_str());
        }
        if let Some(port) = self.cache_port {
            fresh &= env.set(CACHE_PORT, port);
        }
        if let Some(expires) = self.cache_expires {
            fresh &= env.set(CACHE_EXPIRES, expires);
        }
        fresh
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.timeout_seconds),
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                backoff_step: Duration::from_millis(self.retry_backoff_ms),
            },
        }
    }

    pub fn cache_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_connect_timeout_seconds)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, None);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_backoff_ms, 1000);
        assert!(config.cache_failures);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_snake_case_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sgw-client.toml");
        std::fs::write(
            &path,
            r#"
base_url = "https://api.test"
cache_host = "memcached.internal"
cache_port = 11211
max_attempts = 5
cache_failures = false
"#,
        )
        .unwrap();

        let config = ClientConfig::load_from_file(&path).unwrap();
        assert_eq!(config.cache_host.as_deref(), Some("memcached.internal"));
        assert_eq!(config.cache_port, Some(11211));
        assert_eq!(config.http_settings().retry.max_attempts, 5);
        assert!(!config.cache_failures);
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_unparseable_file_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "base_url = [").unwrap();
        assert!(matches!(
            ClientConfig::load_from_file(&path),
            Err(SgwError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_url = ClientConfig {
            base_url: Some("::nope".to_string()),
            ..ClientConfig::default()
        };
        assert!(bad_url.validate().is_err());

        let no_attempts = ClientConfig {
            max_attempts: 0,
            ..ClientConfig::default()
        };
        assert!(no_attempts.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_cache_expires() {
        let never_expires = ClientConfig {
            cache_expires: Some(0),
            ..ClientConfig::default()
        };
        let err = never_expires.validate().unwrap_err();
        assert!(err.to_string().contains("cache_expires"));

        let one_second = ClientConfig {
            cache_expires: Some(1),
            ..ClientConfig::default()
        };
        assert!(one_second.validate().is_ok());
    }

    #[test]
    fn test_seed_reports_existing_keys() {
        let config = ClientConfig {
            base_url: Some("https://api.test".to_string()),
            cache_expires: Some(60),
            ..ClientConfig::default()
        };
        let env = EnvironmentStore::new();
        assert!(config.seed(&env));
        assert_eq!(env.get_u64(CACHE_EXPIRES), Some(60));
        assert!(!config.seed(&env));
    }
}

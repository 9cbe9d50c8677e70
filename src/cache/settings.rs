//! Connection settings shared by the cache drivers

use std::time::Duration;

use crate::environment::{EnvironmentStore, CACHE_HOST, CACHE_PORT};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the cache server lives.
///
/// A missing port resolves per backend (11211 for Memcached, 6379 for Redis),
/// so a single host setting works for either server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub host: String,
    pub port: Option<u16>,
    pub connect_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl CacheSettings {
    /// Read host and port from the environment store
    pub fn from_environment(env: &EnvironmentStore, connect_timeout: Duration) -> Self {
        let host = env
            .get_string(CACHE_HOST)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = env
            .get_u64(CACHE_PORT)
            .and_then(|p| u16::try_from(p).ok())
            .filter(|p| *p != 0);

        Self {
            host,
            port,
            connect_timeout,
        }
    }

    pub fn address(&self, default_port: u16) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(default_port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_environment_empty() {
        let env = EnvironmentStore::new();
        let settings = CacheSettings::from_environment(&env, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.address(11211), "localhost:11211");
        assert_eq!(settings.address(6379), "localhost:6379");
    }

    #[test]
    fn test_configured_port_overrides_backend_default() {
        let env = EnvironmentStore::new();
        env.set(CACHE_HOST, "cache.internal");
        env.set(CACHE_PORT, 11311);
        let settings = CacheSettings::from_environment(&env, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(settings.address(6379), "cache.internal:11311");
    }

    #[test]
    fn test_out_of_range_port_is_ignored() {
        let env = EnvironmentStore::new();
        env.set(CACHE_PORT, 70000);
        let settings = CacheSettings::from_environment(&env, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(settings.port, None);
    }
}

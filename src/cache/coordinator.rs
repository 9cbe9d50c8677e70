//! Cache coordinator
//!
//! Selects the process-wide cache driver and exposes it behind one interface.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::providers::default_connectors;
use super::settings::CacheSettings;
use super::traits::{CacheDriver, DriverConnector};
use crate::logging::CACHE_CHANNEL;

/// Owns at most one cache driver for the lifetime of the client.
///
/// Selection walks the candidates in order. The first candidate that can be
/// constructed wins whether or not its health check passes; a failing health
/// check only leaves the status unset. Unconstructible candidates are logged
/// and skipped.
///
/// Backend errors after selection are logged and flattened: `get` misses,
/// `set` and `delete` report `false`.
pub struct CacheCoordinator {
    driver: Option<Arc<dyn CacheDriver>>,
    status: Option<&'static str>,
}

impl std::fmt::Debug for CacheCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheCoordinator")
            .field("driver", &self.driver.as_ref().map(|d| d.provider_name()))
            .field("status", &self.status)
            .finish()
    }
}

impl CacheCoordinator {
    /// Select from the compiled-in drivers (Memcached, then Redis)
    pub async fn from_settings(settings: &CacheSettings) -> Self {
        Self::select(settings, &default_connectors()).await
    }

    /// Select from an explicit candidate list
    pub async fn select(settings: &CacheSettings, candidates: &[Box<dyn DriverConnector>]) -> Self {
        for candidate in candidates {
            let name = candidate.name();

            if !candidate.is_available() {
                debug!(target: CACHE_CHANNEL, driver = name, "Cache driver not available, skipping");
                continue;
            }

            let driver = match candidate.connect(settings).await {
                Ok(driver) => driver,
                Err(e) => {
                    warn!(target: CACHE_CHANNEL, "{name}: {e}");
                    continue;
                }
            };

            let healthy = driver.health_check().await;
            if healthy {
                info!(target: CACHE_CHANNEL, driver = name, host = %settings.host, "Cache driver selected");
            } else {
                warn!(
                    target: CACHE_CHANNEL,
                    driver = name,
                    host = %settings.host,
                    "Cache driver constructed but health check failed, caching disabled"
                );
            }

            return Self {
                driver: Some(driver),
                status: healthy.then_some(name),
            };
        }

        warn!(target: CACHE_CHANNEL, "No cache driver could be constructed, caching disabled");
        Self::disabled()
    }

    /// Coordinator with no driver; every lookup misses
    pub fn disabled() -> Self {
        Self {
            driver: None,
            status: None,
        }
    }

    /// Wrap an already-built driver, running its health check once
    pub async fn with_driver(name: &'static str, driver: Arc<dyn CacheDriver>) -> Self {
        let healthy = driver.health_check().await;
        Self {
            driver: Some(driver),
            status: healthy.then_some(name),
        }
    }

    /// Name of the active driver if it passed its health check
    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    /// Whether callers should use the cache at all
    pub fn is_enabled(&self) -> bool {
        self.status.is_some()
    }

    pub fn driver(&self) -> Option<&Arc<dyn CacheDriver>> {
        self.driver.as_ref()
    }

    pub async fn health_check(&self) -> bool {
        match &self.driver {
            Some(driver) => driver.health_check().await,
            None => false,
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let driver = self.driver.as_ref()?;
        match driver.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(target: CACHE_CHANNEL, key = key, error = %e, "Cache GET failed, treating as miss");
                None
            }
        }
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> bool {
        let Some(driver) = self.driver.as_ref() else {
            return false;
        };
        match driver.set(key, value, ttl).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(target: CACHE_CHANNEL, key = key, error = %e, "Cache SET failed");
                false
            }
        }
    }

    pub async fn delete(&self, key: &str) -> bool {
        let Some(driver) = self.driver.as_ref() else {
            return false;
        };
        match driver.delete(key).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(target: CACHE_CHANNEL, key = key, error = %e, "Cache DEL failed");
                false
            }
        }
    }

    /// Read and deserialize a JSON value; undecodable entries read as misses
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    target: CACHE_CHANNEL,
                    key = key,
                    error = %e,
                    "Failed to deserialize cached JSON, treating as miss"
                );
                None
            }
        }
    }

    /// Serialize a value to JSON and store it
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, &raw, ttl).await,
            Err(e) => {
                warn!(target: CACHE_CHANNEL, key = key, error = %e, "Failed to serialize cache value");
                false
            }
        }
    }
}

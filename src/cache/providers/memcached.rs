//! Memcached cache driver
//!
//! Requires the `cache-memcached` feature flag.

use std::sync::Arc;
use std::time::Duration;

use async_memcached::{AsciiProtocol, Client, Error as MemcachedError, Status};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::settings::CacheSettings;
use crate::cache::traits::{CacheDriver, DriverConnector};
use crate::logging::CACHE_CHANNEL;

pub const DEFAULT_PORT: u16 = 11211;

/// Longest relative exptime; larger values are read as a Unix timestamp
pub const MAX_RELATIVE_TTL_SECS: u64 = 60 * 60 * 24 * 30;

/// Convert a TTL to a Memcached exptime.
///
/// An exptime of 0 means "never expire" to the server, so sub-second TTLs
/// round up to one second. Anything past 30 days is capped.
pub fn exptime(ttl: Duration) -> i64 {
    ttl.as_secs().clamp(1, MAX_RELATIVE_TTL_SECS) as i64
}

/// Memcached-backed cache driver
///
/// A missing key comes back as `Ok(None)` / `Ok(false)`; transport and
/// protocol failures are errors.
pub struct MemcachedDriver {
    client: Arc<Mutex<Client>>,
    address: String,
}

impl std::fmt::Debug for MemcachedDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemcachedDriver")
            .field("address", &self.address)
            .field("client", &"Client")
            .finish()
    }
}

impl MemcachedDriver {
    /// Connect to the configured server
    pub async fn connect(settings: &CacheSettings) -> CacheResult<Self> {
        let address = settings.address(DEFAULT_PORT);
        let dsn = format!("tcp://{address}");

        let client = tokio::time::timeout(settings.connect_timeout, Client::new(&dsn))
            .await
            .map_err(|_| {
                CacheError::Timeout(format!(
                    "connecting to memcached at {address} after {:?}",
                    settings.connect_timeout
                ))
            })?
            .map_err(|e| {
                CacheError::Connect(format!("Failed to connect to Memcached: {e}"))
            })?;

        debug!(target: CACHE_CHANNEL, address = %address, "Memcached driver connected");

        Ok(Self {
            client: Arc::new(Mutex::new(client)),
            address,
        })
    }
}

#[async_trait]
impl CacheDriver for MemcachedDriver {
    async fn health_check(&self) -> bool {
        let mut client = self.client.lock().await;
        match client.version().await {
            Ok(_) => true,
            Err(e) => {
                debug!(target: CACHE_CHANNEL, error = %e, "Memcached health check failed");
                false
            }
        }
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut client = self.client.lock().await;

        let result = client
            .get(key)
            .await
            .map_err(|e| CacheError::Backend(format!("Memcached GET failed: {e}")))?;

        match result {
            Some(value) => {
                let data = String::from_utf8(value.data.unwrap_or_default())
                    .map_err(|e| CacheError::InvalidValue(format!("Invalid UTF-8 data: {e}")))?;
                debug!(target: CACHE_CHANNEL, key = key, "Cache HIT (memcached)");
                Ok(Some(data))
            }
            None => {
                debug!(target: CACHE_CHANNEL, key = key, "Cache MISS (memcached)");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<bool> {
        let mut client = self.client.lock().await;
        let ttl_seconds = exptime(ttl);

        client
            .set(key, value.as_bytes(), Some(ttl_seconds), None)
            .await
            .map_err(|e| CacheError::Backend(format!("Memcached SET failed: {e}")))?;

        debug!(
            target: CACHE_CHANNEL,
            key = key,
            ttl_seconds = ttl_seconds,
            "Cache SET (memcached)"
        );
        Ok(true)
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut client = self.client.lock().await;

        // NOT_FOUND comes back as an error from the client
        match client.delete(key).await {
            Ok(()) => Ok(true),
            Err(MemcachedError::Protocol(Status::NotFound)) => {
                debug!(target: CACHE_CHANNEL, key = key, "Cache DEL miss (memcached)");
                Ok(false)
            }
            Err(e) => Err(CacheError::Backend(format!("Memcached DELETE failed: {e}"))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "memcached"
    }
}

/// Candidate entry for the coordinator
#[derive(Debug, Clone, Copy, Default)]
pub struct MemcachedConnector;

#[async_trait]
impl DriverConnector for MemcachedConnector {
    fn name(&self) -> &'static str {
        "memcached"
    }

    async fn connect(&self, settings: &CacheSettings) -> CacheResult<Arc<dyn CacheDriver>> {
        let driver = MemcachedDriver::connect(settings).await?;
        Ok(Arc::new(driver))
    }
}

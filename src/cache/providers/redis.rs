//! Redis cache driver
//!
//! Uses `redis::aio::ConnectionManager` for async multiplexed connections.
//! Requires the `cache-redis` feature flag.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::settings::CacheSettings;
use crate::cache::traits::{CacheDriver, DriverConnector};
use crate::logging::CACHE_CHANNEL;

pub const DEFAULT_PORT: u16 = 6379;

/// Redis-backed cache driver using ConnectionManager
#[derive(Clone)]
pub struct RedisDriver {
    connection_manager: redis::aio::ConnectionManager,
    address: String,
}

impl std::fmt::Debug for RedisDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDriver")
            .field("address", &self.address)
            .field("connection_manager", &"ConnectionManager")
            .finish()
    }
}

impl RedisDriver {
    /// Connect to the configured server
    pub async fn connect(settings: &CacheSettings) -> CacheResult<Self> {
        let address = settings.address(DEFAULT_PORT);
        let client = redis::Client::open(format!("redis://{address}")).map_err(|e| {
            CacheError::Connect(format!("Failed to create Redis client: {e}"))
        })?;

        let connection_manager = tokio::time::timeout(
            settings.connect_timeout,
            redis::aio::ConnectionManager::new(client),
        )
        .await
        .map_err(|_| {
            CacheError::Timeout(format!(
                "connecting to redis at {address} after {:?}",
                settings.connect_timeout
            ))
        })?
        .map_err(|e| CacheError::Connect(format!("Failed to connect to Redis: {e}")))?;

        debug!(target: CACHE_CHANNEL, address = %address, "Redis driver connected");

        Ok(Self {
            connection_manager,
            address,
        })
    }
}

#[async_trait]
impl CacheDriver for RedisDriver {
    async fn health_check(&self) -> bool {
        let mut conn = self.connection_manager.clone();
        let pong: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(reply) => reply == "PONG",
            Err(e) => {
                debug!(target: CACHE_CHANNEL, error = %e, "Redis health check failed");
                false
            }
        }
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection_manager.clone();
        let result: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis GET failed: {e}")))?;

        if result.is_some() {
            debug!(target: CACHE_CHANNEL, key = key, "Cache HIT (redis)");
        } else {
            debug!(target: CACHE_CHANNEL, key = key, "Cache MISS (redis)");
        }

        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<bool> {
        let mut conn = self.connection_manager.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_seconds)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis SETEX failed: {e}")))?;

        debug!(target: CACHE_CHANNEL, key = key, ttl_seconds = ttl_seconds, "Cache SET (redis)");
        Ok(true)
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection_manager.clone();

        let removed: u64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis DEL failed: {e}")))?;

        debug!(target: CACHE_CHANNEL, key = key, removed = removed, "Cache DEL (redis)");
        Ok(removed > 0)
    }

    fn provider_name(&self) -> &'static str {
        "redis"
    }
}

/// Candidate entry for the coordinator
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisConnector;

#[async_trait]
impl DriverConnector for RedisConnector {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn connect(&self, settings: &CacheSettings) -> CacheResult<Arc<dyn CacheDriver>> {
        let driver = RedisDriver::connect(settings).await?;
        Ok(Arc::new(driver))
    }
}

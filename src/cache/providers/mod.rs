//! Cache driver implementations

#[cfg(feature = "cache-memcached")]
pub mod memcached;

#[cfg(feature = "cache-redis")]
pub mod redis;

use super::traits::DriverConnector;

#[cfg(feature = "cache-memcached")]
pub use self::memcached::{MemcachedConnector, MemcachedDriver};

#[cfg(feature = "cache-redis")]
pub use self::redis::{RedisConnector, RedisDriver};

/// Candidate drivers in selection order: Memcached first, then Redis.
///
/// Backends whose feature is not compiled in are left out, which is how an
/// absent client library shows up at runtime.
pub fn default_connectors() -> Vec<Box<dyn DriverConnector>> {
    #[allow(unused_mut)]
    let mut connectors: Vec<Box<dyn DriverConnector>> = Vec::new();

    #[cfg(feature = "cache-memcached")]
    connectors.push(Box::new(MemcachedConnector));

    #[cfg(feature = "cache-redis")]
    connectors.push(Box::new(RedisConnector));

    connectors
}

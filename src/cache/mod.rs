//! # Response Cache
//!
//! Pluggable cache for API responses with a transparent fallback chain.
//!
//! ## Architecture
//!
//! ```text
//! CacheCoordinator               <- picks one driver at startup, never reselects
//!   └── Arc<dyn CacheDriver>
//!         ├── MemcachedDriver    <- tried first (feature `cache-memcached`)
//!         └── RedisDriver        <- tried second (feature `cache-redis`)
//! ```
//!
//! If no candidate can be constructed the coordinator reports status `None`
//! and callers skip caching entirely. Backend failures after startup are
//! logged on the `cache` channel and read as misses; they never reach callers.

pub mod coordinator;
pub mod errors;
pub mod providers;
pub mod settings;
pub mod traits;

pub use coordinator::CacheCoordinator;
pub use errors::{CacheError, CacheResult};
pub use providers::default_connectors;
pub use settings::CacheSettings;
pub use traits::{CacheDriver, DriverConnector, DEFAULT_TTL};

#[cfg(feature = "cache-memcached")]
pub use providers::{MemcachedConnector, MemcachedDriver};

#[cfg(feature = "cache-redis")]
pub use providers::{RedisConnector, RedisDriver};

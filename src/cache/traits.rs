//! Cache driver contracts
//!
//! A [`CacheDriver`] talks to exactly one cache server. A [`DriverConnector`]
//! knows how to build one, and is what the coordinator iterates over when it
//! picks the process-wide driver.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::errors::CacheResult;
use super::settings::CacheSettings;

/// Default TTL applied when a caller has no explicit expiry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Operations every cache backend provides.
///
/// `get` returns `Ok(None)` for absent keys; backends that signal "not found"
/// separately fold that into `None` as well.
#[async_trait]
pub trait CacheDriver: Send + Sync + std::fmt::Debug {
    /// Lightweight server-native ping; `false` on any connectivity problem.
    async fn health_check(&self) -> bool;

    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` for `ttl`. Returns the backend's own success flag.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<bool>;

    /// Returns `true` if the backend reports the key as removed.
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    fn provider_name(&self) -> &'static str;
}

/// Builds a driver for one backend kind.
#[async_trait]
pub trait DriverConnector: Send + Sync {
    /// Name reported as the coordinator status when this driver wins.
    fn name(&self) -> &'static str;

    /// Whether the backend's client library is present in this build.
    fn is_available(&self) -> bool {
        true
    }

    /// Construct and connect. Errors mean "try the next candidate".
    async fn connect(&self, settings: &CacheSettings) -> CacheResult<Arc<dyn CacheDriver>>;
}

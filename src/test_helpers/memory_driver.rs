use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::cache::{CacheDriver, CacheError, CacheResult, CacheSettings, DriverConnector};

#[derive(Debug, Default)]
struct MemoryState {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
    unhealthy: bool,
}

/// Cache driver backed by a map, expiring entries on the tokio clock so
/// paused-time tests can advance past a TTL.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDriver {
    state: Arc<MemoryState>,
}

impl InMemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver whose health check fails
    pub fn unhealthy() -> Self {
        Self {
            state: Arc::new(MemoryState {
                unhealthy: true,
                ..MemoryState::default()
            }),
        }
    }

    pub fn get_calls(&self) -> usize {
        self.state.gets.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.state.sets.load(Ordering::SeqCst)
    }

    /// Read a live entry without counting it as a `get`
    pub fn peek(&self, key: &str) -> Option<String> {
        let entries = self.state.entries.lock();
        entries
            .get(key)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(value, _)| value.clone())
    }

    pub fn len(&self) -> usize {
        self.state.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheDriver for InMemoryDriver {
    async fn health_check(&self) -> bool {
        !self.state.unhealthy
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.state.gets.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.state.entries.lock();
        let expired = matches!(entries.get(key), Some((_, expires_at)) if Instant::now() >= *expires_at);
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<bool> {
        self.state.sets.fetch_add(1, Ordering::SeqCst);
        self.state
            .entries
            .lock()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(true)
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        Ok(self.state.entries.lock().remove(key).is_some())
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectBehavior {
    Connect,
    Fail,
    Unavailable,
}

/// Scripted driver candidate for coordinator selection
#[derive(Debug, Clone)]
pub struct StubConnector {
    name: &'static str,
    behavior: ConnectBehavior,
    driver: InMemoryDriver,
    attempts: Arc<AtomicUsize>,
}

impl StubConnector {
    /// Connects to a healthy in-memory driver
    pub fn healthy(name: &'static str) -> Self {
        Self::with_driver(name, InMemoryDriver::new())
    }

    /// Connects, but the driver fails its health check
    pub fn unhealthy(name: &'static str) -> Self {
        Self::with_driver(name, InMemoryDriver::unhealthy())
    }

    /// Connects to the given driver so a test can inspect it
    pub fn with_driver(name: &'static str, driver: InMemoryDriver) -> Self {
        Self {
            name,
            behavior: ConnectBehavior::Connect,
            driver,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Construction fails as if the server were unreachable
    pub fn failing(name: &'static str) -> Self {
        Self {
            behavior: ConnectBehavior::Fail,
            ..Self::healthy(name)
        }
    }

    /// Client library missing from the build
    pub fn unavailable(name: &'static str) -> Self {
        Self {
            behavior: ConnectBehavior::Unavailable,
            ..Self::healthy(name)
        }
    }

    pub fn driver(&self) -> &InMemoryDriver {
        &self.driver
    }

    pub fn connect_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DriverConnector for StubConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.behavior != ConnectBehavior::Unavailable
    }

    async fn connect(&self, settings: &CacheSettings) -> CacheResult<Arc<dyn CacheDriver>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            ConnectBehavior::Connect => Ok(Arc::new(self.driver.clone())),
            _ => Err(CacheError::Connect(format!(
                "{} unreachable at {}",
                self.name, settings.host
            ))),
        }
    }
}

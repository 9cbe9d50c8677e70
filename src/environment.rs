//! # Environment Store
//!
//! Key/value holder for the settings every service reads at construction:
//! base URL, auth header, cache host/port and cache TTL. Writes are
//! first-write-wins so a second initialization cannot silently replace the
//! values the running services were built from.
//!
//! A key holding `null` counts as unset, both for [`EnvironmentStore::get`]
//! and for the first-write-wins check.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

pub const BASE_URL: &str = "baseUrl";
pub const BASE_AUTH: &str = "baseAuth";
pub const CACHE_HOST: &str = "cacheHost";
pub const CACHE_PORT: &str = "cachePort";
pub const CACHE_EXPIRES: &str = "cacheExpires";

#[derive(Debug, Default)]
pub struct EnvironmentStore {
    env: RwLock<HashMap<String, Value>>,
}

impl EnvironmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` unless the key already holds a non-null value.
    ///
    /// Returns `true` if the value was stored, `false` if the key was taken.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        let mut env = self.env.write();
        match env.get(key) {
            Some(existing) if !existing.is_null() => false,
            _ => {
                env.insert(key.to_string(), value.into());
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.env.read().get(key).filter(|v| !v.is_null()).cloned()
    }

    /// String view of a key; numbers are rendered, other shapes are ignored.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Unsigned view of a key; numeric strings are accepted.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match self.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_all(&self) -> HashMap<String, Value> {
        self.env.read().clone()
    }

    /// Remove a key. Returns `true` if the key existed, even when it held `null`.
    pub fn remove(&self, key: &str) -> bool {
        self.env.write().remove(key).is_some()
    }
}

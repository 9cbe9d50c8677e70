//! Cached-fetch facade
//!
//! The single read path behind every endpoint wrapper: look the request up in
//! the cache, fall through to HTTP on a miss, then store whatever came back.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use crate::cache::{CacheCoordinator, DEFAULT_TTL};
use crate::http::{encode_query_string, Envelope, HttpClient, Query};
use crate::logging::{CACHE_CHANNEL, HTTP_CHANNEL};

/// What gets stored and for how long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    /// Store failed envelopes too. A transient upstream failure is then
    /// served from cache until the entry expires.
    pub cache_failures: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            cache_failures: true,
        }
    }
}

/// Cache key for a request: hex SHA-256 of `uri?<encoded query>`
pub fn cache_key(uri: &str, query: &Query) -> String {
    let mut hasher = Sha256::new();
    hasher.update(uri.as_bytes());
    hasher.update(b"?");
    hasher.update(encode_query_string(query).as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct CachedApi {
    cache: Arc<CacheCoordinator>,
    http: Arc<HttpClient>,
    policy: CachePolicy,
}

impl CachedApi {
    pub fn new(cache: Arc<CacheCoordinator>, http: Arc<HttpClient>, policy: CachePolicy) -> Self {
        Self {
            cache,
            http,
            policy,
        }
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    pub fn cache(&self) -> &Arc<CacheCoordinator> {
        &self.cache
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// GET `uri` through the cache.
    ///
    /// Without a healthy cache driver this is a plain [`HttpClient::get`]. A
    /// hit returns the stored envelope unchanged. On a miss the fetched
    /// envelope is stored for the policy TTL; failed envelopes only when
    /// `cache_failures` is set.
    pub async fn get_cached(&self, uri: &str, query: &Query) -> Envelope {
        if !self.cache.is_enabled() {
            return self.http.get(uri, query).await;
        }

        let key = cache_key(uri, query);
        if let Some(hit) = self.cache.get_json::<Envelope>(&key).await {
            debug!(target: CACHE_CHANNEL, key = %key, uri = uri, "Cache HIT");
            return hit;
        }

        let envelope = match AssertUnwindSafe(self.http.get(uri, query))
            .catch_unwind()
            .await
        {
            Ok(envelope) => envelope,
            Err(_) => {
                error!(target: HTTP_CHANNEL, uri = uri, "Unexpected failure during cached fetch");
                Envelope::failure(format!("[Error] - unexpected failure fetching {uri}"))
            }
        };

        if envelope.success || self.policy.cache_failures {
            self.cache.set_json(&key, &envelope, self.policy.ttl).await;
        } else {
            debug!(target: CACHE_CHANNEL, key = %key, uri = uri, "Not caching failed response");
        }

        envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheDriver;
    use crate::http::{query_from, RetryPolicy};
    use crate::test_helpers::{InMemoryDriver, StubReply, StubTransport};
    use serde_json::json;

    async fn api_with(
        stub: &StubTransport,
        driver: Option<InMemoryDriver>,
        policy: CachePolicy,
    ) -> CachedApi {
        let http = HttpClient::with_transport(Arc::new(stub.clone()), RetryPolicy::default()).await;
        let cache = match driver {
            Some(driver) => CacheCoordinator::with_driver("memory", Arc::new(driver)).await,
            None => CacheCoordinator::disabled(),
        };
        CachedApi::new(Arc::new(cache), Arc::new(http), policy)
    }

    #[test]
    fn test_cache_key_is_hex_sha256() {
        let key = cache_key("api/competitions", &query_from([("sportId", "Football")]));
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_cache_key_distinguishes_uri_and_query() {
        let empty = Query::new();
        assert_ne!(cache_key("api/sports", &empty), cache_key("api/countries", &empty));
        assert_ne!(
            cache_key("api/sports", &query_from([("page", 1)])),
            cache_key("api/sports", &query_from([("page", 2)]))
        );
    }

    #[tokio::test]
    async fn test_hit_skips_network() {
        let stub = StubTransport::new();
        stub.always("api/projects", StubReply::Json(200, json!([{"id": 3}])));
        let api = api_with(&stub, Some(InMemoryDriver::new()), CachePolicy::default()).await;

        let first = api.get_cached("api/projects", &Query::new()).await;
        let second = api.get_cached("api/projects", &Query::new()).await;
        assert_eq!(first, second);
        assert_eq!(stub.calls("api/projects"), 1);
    }

    #[tokio::test]
    async fn test_failures_not_cached_when_disabled_by_policy() {
        let stub = StubTransport::new();
        stub.always("api/projects", StubReply::Status(404));
        let driver = InMemoryDriver::new();
        let policy = CachePolicy {
            cache_failures: false,
            ..CachePolicy::default()
        };
        let api = api_with(&stub, Some(driver.clone()), policy).await;

        api.get_cached("api/projects", &Query::new()).await;
        api.get_cached("api/projects", &Query::new()).await;
        assert_eq!(stub.calls("api/projects"), 2);
        assert_eq!(driver.set_calls(), 0);
    }

    #[tokio::test]
    async fn test_panic_becomes_failure_envelope() {
        let stub = StubTransport::new();
        stub.always("api/sports", StubReply::Panic);
        let driver = InMemoryDriver::new();
        let api = api_with(&stub, Some(driver.clone()), CachePolicy::default()).await;

        let envelope = api.get_cached("api/sports", &Query::new()).await;
        assert!(!envelope.success);
        assert_eq!(
            envelope.message,
            "[Error] - unexpected failure fetching api/sports"
        );
        assert_eq!(driver.set_calls(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_entry_is_refetched() {
        let stub = StubTransport::new();
        stub.always("api/sports", StubReply::Json(200, json!(["football"])));
        let driver = InMemoryDriver::new();
        let api = api_with(&stub, Some(driver.clone()), CachePolicy::default()).await;

        let key = cache_key("api/sports", &Query::new());
        driver.set(&key, "garbage", DEFAULT_TTL).await.unwrap();

        let envelope = api.get_cached("api/sports", &Query::new()).await;
        assert_eq!(envelope.data, json!(["football"]));
        assert_eq!(stub.calls("api/sports"), 1);
    }
}

//! # Client bootstrap
//!
//! [`SgwClient`] owns one of each service: environment store, HTTP client,
//! cache coordinator, cached-fetch facade and endpoint provider. Build it
//! once at startup and share it by reference or `Arc`.
//!
//! [`install`] and [`instance`] keep a single client for the whole process
//! for callers that cannot thread one through.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::api::{ApiProvider, CachePolicy, CachedApi};
use crate::cache::{CacheCoordinator, CacheSettings, DEFAULT_TTL};
use crate::config::ClientConfig;
use crate::environment::{EnvironmentStore, CACHE_EXPIRES};
use crate::errors::{SgwError, SgwResult};
use crate::http::{Envelope, HttpClient, Query};

static INSTANCE: OnceLock<Arc<SgwClient>> = OnceLock::new();

/// Operational status read straight off the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClientStatus {
    /// Name of the active cache driver, `None` when caching is off
    pub cache: Option<&'static str>,
    /// Whether the startup probe of the base URL answered 200
    pub http: bool,
    /// Whether the upstream health check passed
    pub api: bool,
}

#[derive(Debug)]
pub struct SgwClient {
    env: Arc<EnvironmentStore>,
    http: Arc<HttpClient>,
    cache: Arc<CacheCoordinator>,
    api: Arc<CachedApi>,
    provider: ApiProvider,
}

impl SgwClient {
    /// Build a client from `config` over a fresh environment store
    pub async fn create(config: &ClientConfig) -> SgwResult<Self> {
        Self::create_in(Arc::new(EnvironmentStore::new()), config).await
    }

    /// Seed `env` from `config` and build every service from it.
    ///
    /// Fails with [`SgwError::AlreadyInitialized`] if `env` already holds any
    /// of the connection keys.
    pub async fn create_in(env: Arc<EnvironmentStore>, config: &ClientConfig) -> SgwResult<Self> {
        config.validate()?;
        if !config.seed(&env) {
            return Err(SgwError::AlreadyInitialized(
                "environment store was already configured".to_string(),
            ));
        }

        let http = HttpClient::from_environment(&env, config.http_settings()).await?;
        let cache_settings = CacheSettings::from_environment(&env, config.cache_connect_timeout());
        let cache = CacheCoordinator::from_settings(&cache_settings).await;
        let policy = CachePolicy {
            ttl: env
                .get_u64(CACHE_EXPIRES)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TTL),
            cache_failures: config.cache_failures,
        };

        Ok(Self::from_parts(env, http, cache, policy).await)
    }

    /// Assemble a client from pre-built services
    pub async fn from_parts(
        env: Arc<EnvironmentStore>,
        http: HttpClient,
        cache: CacheCoordinator,
        policy: CachePolicy,
    ) -> Self {
        let http = Arc::new(http);
        let cache = Arc::new(cache);
        let api = Arc::new(CachedApi::new(cache.clone(), http.clone(), policy));
        let provider = ApiProvider::new(api.clone()).await;

        let client = Self {
            env,
            http,
            cache,
            api,
            provider,
        };
        info!(status = ?client.status(), ttl_seconds = policy.ttl.as_secs(), "SportsGateway client ready");
        client
    }

    pub fn status(&self) -> ClientStatus {
        ClientStatus {
            cache: self.cache.status(),
            http: self.http.status(),
            api: self.provider.status(),
        }
    }

    pub fn environment(&self) -> &EnvironmentStore {
        &self.env
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn cache(&self) -> &CacheCoordinator {
        &self.cache
    }

    pub fn api(&self) -> &ApiProvider {
        &self.provider
    }

    /// Cached GET of an arbitrary URI
    pub async fn get_cached(&self, uri: &str, query: &Query) -> Envelope {
        self.api.get_cached(uri, query).await
    }
}

/// Build the process-wide client. A second call fails.
pub async fn install(config: &ClientConfig) -> SgwResult<Arc<SgwClient>> {
    if INSTANCE.get().is_some() {
        return Err(SgwError::AlreadyInitialized(
            "SgwClient::install was already called".to_string(),
        ));
    }

    let client = Arc::new(SgwClient::create(config).await?);
    INSTANCE.set(client.clone()).map_err(|_| {
        SgwError::AlreadyInitialized("SgwClient::install was already called".to_string())
    })?;
    Ok(client)
}

/// The client built by [`install`]
pub fn instance() -> SgwResult<Arc<SgwClient>> {
    INSTANCE
        .get()
        .cloned()
        .ok_or_else(|| SgwError::NotInitialized("call sgw_client::install first".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::BASE_URL;
    use crate::http::RetryPolicy;
    use crate::test_helpers::{InMemoryDriver, StubReply, StubTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_in_rejects_seeded_store() {
        let env = Arc::new(EnvironmentStore::new());
        env.set(BASE_URL, "https://first.test");

        let config = ClientConfig {
            base_url: Some("https://second.test".to_string()),
            ..ClientConfig::default()
        };
        let result = SgwClient::create_in(env.clone(), &config).await;
        assert!(matches!(result, Err(SgwError::AlreadyInitialized(_))));
        assert_eq!(
            env.get_string(BASE_URL).as_deref(),
            Some("https://first.test")
        );
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_seeding() {
        let env = Arc::new(EnvironmentStore::new());
        let config = ClientConfig {
            max_attempts: 0,
            ..ClientConfig::default()
        };
        let result = SgwClient::create_in(env.clone(), &config).await;
        assert!(matches!(result, Err(SgwError::ConfigurationError(_))));
        assert!(env.get_all().is_empty());
    }

    #[tokio::test]
    async fn test_zero_cache_expires_is_rejected() {
        let env = Arc::new(EnvironmentStore::new());
        let config = ClientConfig {
            cache_expires: Some(0),
            ..ClientConfig::default()
        };
        let result = SgwClient::create_in(env.clone(), &config).await;
        assert!(matches!(result, Err(SgwError::ConfigurationError(_))));
        assert!(env.get(CACHE_EXPIRES).is_none());
    }

    #[tokio::test]
    async fn test_status_reflects_services() {
        let stub = StubTransport::new();
        stub.always("/api/healthcheck", StubReply::Json(200, json!({"success": true})));
        let http = HttpClient::with_transport(Arc::new(stub), RetryPolicy::default()).await;
        let cache = CacheCoordinator::with_driver("memory", Arc::new(InMemoryDriver::new())).await;

        let client = SgwClient::from_parts(
            Arc::new(EnvironmentStore::new()),
            http,
            cache,
            CachePolicy::default(),
        )
        .await;

        assert_eq!(
            client.status(),
            ClientStatus {
                cache: Some("memory"),
                http: true,
                api: true,
            }
        );
        assert_eq!(
            serde_json::to_value(client.status()).unwrap(),
            json!({"cache": "memory", "http": true, "api": true})
        );
    }

    #[tokio::test]
    async fn test_disabled_services_report_false() {
        let client = SgwClient::from_parts(
            Arc::new(EnvironmentStore::new()),
            HttpClient::disabled(),
            CacheCoordinator::disabled(),
            CachePolicy::default(),
        )
        .await;
        let status = client.status();
        assert_eq!(status.cache, None);
        assert!(!status.http);
        assert!(!status.api);
    }
}

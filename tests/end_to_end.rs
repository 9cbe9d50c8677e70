//! Full client scenarios over a stub backend and in-memory cache

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use sgw_client::api::{cache_key, CachePolicy};
use sgw_client::cache::{CacheCoordinator, CacheSettings, DriverConnector};
use sgw_client::environment::{EnvironmentStore, CACHE_EXPIRES};
use sgw_client::http::{query_from, Envelope, HttpClient, Query, RetryPolicy};
use sgw_client::test_helpers::{InMemoryDriver, StubConnector, StubReply, StubTransport};
use sgw_client::{ClientConfig, SgwClient};

/// Seed the store from config and wire stub services in place of the network
async fn stub_client(stub: &StubTransport, driver: &InMemoryDriver) -> SgwClient {
    let config = ClientConfig {
        base_url: Some("https://api.test".to_string()),
        base_auth: Some("Basic abc".to_string()),
        cache_host: Some("localhost".to_string()),
        cache_port: Some(11211),
        cache_expires: Some(60),
        ..ClientConfig::default()
    };
    let env = Arc::new(EnvironmentStore::new());
    assert!(config.seed(&env));

    let http = HttpClient::with_transport(Arc::new(stub.clone()), RetryPolicy::default()).await;
    let candidates: Vec<Box<dyn DriverConnector>> =
        vec![Box::new(StubConnector::with_driver("memcached", driver.clone()))];
    let settings = CacheSettings::from_environment(&env, config.cache_connect_timeout());
    let cache = CacheCoordinator::select(&settings, &candidates).await;
    let policy = CachePolicy {
        ttl: Duration::from_secs(env.get_u64(CACHE_EXPIRES).unwrap_or(300)),
        cache_failures: config.cache_failures,
    };

    SgwClient::from_parts(env, http, cache, policy).await
}

#[tokio::test(start_paused = true)]
async fn test_competitions_fetch_is_cached_for_configured_ttl() {
    let stub = StubTransport::new();
    stub.always("api/competitions", StubReply::Json(200, json!({"id": 1, "name": "EPL"})));
    let driver = InMemoryDriver::new();
    let client = stub_client(&stub, &driver).await;
    assert_eq!(client.status().cache, Some("memcached"));

    let query = query_from([("sportId", "Football")]);
    let envelope = client.api().competitions.list(&query).await;
    assert_eq!(
        envelope,
        Envelope {
            success: true,
            message: String::new(),
            data: json!({"id": 1, "name": "EPL"}),
        }
    );

    let key = cache_key("api/competitions", &query);
    let stored: Envelope = serde_json::from_str(&driver.peek(&key).unwrap()).unwrap();
    assert_eq!(stored, envelope);

    tokio::time::advance(Duration::from_secs(59)).await;
    assert!(driver.peek(&key).is_some());
    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(driver.peek(&key).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_server_failure_is_cached_and_replayed() {
    let stub = StubTransport::new();
    stub.always("api/sports", StubReply::Status(500));
    let driver = InMemoryDriver::new();
    let client = stub_client(&stub, &driver).await;

    let first = client.api().sports.list().await;
    assert!(!first.success);
    assert!(first.message.contains("internal server error"));
    assert_eq!(stub.calls("api/sports"), 3);

    // The failed envelope is stored and replayed without touching the network
    let second = client.api().sports.list().await;
    assert_eq!(second, first);
    assert_eq!(stub.calls("api/sports"), 3);
    assert!(driver.peek(&cache_key("api/sports", &Query::new())).is_some());
}

#[tokio::test]
async fn test_match_centre_event_query() {
    let stub = StubTransport::new();
    stub.always(
        "api/projects/4/matchcentre/football/event",
        StubReply::Json(200, json!({"event": {"id": 77}})),
    );
    let driver = InMemoryDriver::new();
    let client = stub_client(&stub, &driver).await;

    let envelope = client
        .api()
        .matchcentre
        .event(4, "football", "arsenal-v-chelsea", &Query::new())
        .await;
    assert_eq!(envelope.data, json!({"event": {"id": 77}}));

    let sent = stub
        .last_request("api/projects/4/matchcentre/football/event")
        .unwrap();
    assert_eq!(
        sent.query,
        vec![("event".to_string(), "arsenal-v-chelsea".to_string())]
    );
}

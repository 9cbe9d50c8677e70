//! Process-wide client install; kept in its own test binary for a clean global

use sgw_client::{install, instance, ClientConfig, SgwError};

#[tokio::test]
async fn test_install_once_then_instance() {
    assert!(matches!(instance(), Err(SgwError::NotInitialized(_))));

    // No base URL and no reachable cache: both services come up disabled
    let config = ClientConfig {
        cache_host: Some("127.0.0.1".to_string()),
        cache_port: Some(1),
        cache_connect_timeout_seconds: 2,
        ..ClientConfig::default()
    };
    let client = install(&config).await.unwrap();
    let status = client.status();
    assert_eq!(status.cache, None);
    assert!(!status.http);

    assert!(instance().is_ok());
    assert!(matches!(
        install(&config).await,
        Err(SgwError::AlreadyInitialized(_))
    ));
}

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # SportsGateway client
//!
//! Authenticated, cached access to the SportsGateway sports-data API.
//!
//! ## Architecture
//!
//! ```text
//! endpoint wrapper ── CachedApi::get_cached
//!                        ├─ CacheCoordinator (Memcached → Redis → none)
//!                        └─ HttpClient (timeout, retry, Envelope)
//! ```
//!
//! Every network-facing call returns an [`Envelope`]; expected failures never
//! surface as errors. Only configuration misuse yields an [`SgwError`].
//!
//! ## Module Organization
//!
//! - [`environment`] - first-write-wins settings store
//! - [`cache`] - cache drivers and the coordinator that selects one
//! - [`http`] - HTTP client, transport, retry policy and envelope
//! - [`api`] - cached-fetch facade and endpoint wrappers
//! - [`client`] - [`SgwClient`], the root that owns every service
//! - [`config`] - file and environment configuration
//! - [`logging`] - `cache` / `http` log channels
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sgw_client::{query_from, ClientConfig, SgwClient};
//!
//! # async fn example() -> Result<(), sgw_client::SgwError> {
//! let config = ClientConfig {
//!     base_url: Some("https://api.example.com".to_string()),
//!     base_auth: Some("Basic abc".to_string()),
//!     cache_expires: Some(60),
//!     ..ClientConfig::default()
//! };
//! let client = SgwClient::create(&config).await?;
//!
//! let competitions = client
//!     .api()
//!     .competitions
//!     .list(&query_from([("sportId", "Football")]))
//!     .await;
//! if competitions.success {
//!     println!("{}", competitions.data);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod environment;
pub mod errors;
pub mod http;
pub mod logging;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

pub use api::{cache_key, ApiProvider, CachePolicy, CachedApi};
pub use cache::{CacheCoordinator, CacheDriver, CacheError, CacheSettings, DriverConnector};
pub use client::{install, instance, ClientStatus, SgwClient};
pub use config::ClientConfig;
pub use environment::EnvironmentStore;
pub use errors::{SgwError, SgwResult};
pub use http::{query_from, Envelope, HttpClient, HttpFailure, Query, RetryPolicy};
pub use logging::{init_structured_logging, LoggingConfig};

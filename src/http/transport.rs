//! Wire transport for the HTTP client
//!
//! [`HttpTransport`] performs exactly one exchange. Retry, classification and
//! envelope shaping live in [`HttpClient`](super::HttpClient), so a scripted
//! transport can stand in for the network in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::errors::{SgwError, SgwResult};
use crate::logging::HTTP_CHANNEL;

/// One request relative to the transport's base URL
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub uri: String,
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            query: Vec::new(),
            json: None,
        }
    }
}

/// Any response that made it back, whatever its status
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
    /// Fully resolved URL the request went to
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection to {host} failed: {message}")]
    Connect { host: String, message: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport bound to one base URL
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ReqwestTransport {
    /// Build a client sending `Authorization: <auth>` and
    /// `Accept: application/json` on every request.
    pub fn new(base_url: &str, auth: Option<&str>, timeout: Duration) -> SgwResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SgwError::config(format!("Invalid base URL: {e}")))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(auth) = auth.filter(|a| !a.is_empty()) {
            let mut value = HeaderValue::from_str(auth)
                .map_err(|e| SgwError::config(format!("Invalid Authorization value: {e}")))?;
            value.set_sensitive(true);
            default_headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .default_headers(default_headers)
            .user_agent(format!("sgw-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SgwError::config(format!("Failed to create HTTP client: {e}")))?;

        debug!(
            target: HTTP_CHANNEL,
            base_url = %base_url,
            timeout_ms = timeout.as_millis() as u64,
            auth_enabled = auth.is_some(),
            "Created HTTP transport"
        );

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn classify(&self, url: &Url, error: reqwest::Error) -> TransportError {
        if error.is_connect() {
            TransportError::Connect {
                host: url.host_str().unwrap_or("is NULL").to_string(),
                message: error.to_string(),
            }
        } else if error.is_timeout() {
            TransportError::Timeout(format!("{url} after {:?}", self.timeout))
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self
            .base_url
            .join(&request.uri)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", request.uri)))?;

        let mut builder = self.client.request(request.method.clone(), url.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(&url, e))?;
        let status = response.status();
        let resolved = response.url().to_string();
        let body = response.text().await.map_err(|e| self.classify(&url, e))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body,
            url: resolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let result = ReqwestTransport::new("not a url", None, Duration::from_secs(1));
        assert!(matches!(result, Err(SgwError::ConfigurationError(_))));
    }

    #[test]
    fn test_invalid_auth_header_is_configuration_error() {
        let result = ReqwestTransport::new(
            "https://api.test",
            Some("Basic abc\n"),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(SgwError::ConfigurationError(_))));
    }

    #[test]
    fn test_relative_uris_resolve_against_base() {
        let transport =
            ReqwestTransport::new("https://api.test", Some("Basic abc"), Duration::from_secs(1))
                .unwrap();
        let base = transport.base_url();
        assert_eq!(
            base.join("api/competitions").unwrap().as_str(),
            "https://api.test/api/competitions"
        );
        assert_eq!(
            base.join("/api/events/7").unwrap().as_str(),
            "https://api.test/api/events/7"
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_error() {
        let transport =
            ReqwestTransport::new("http://127.0.0.1:1", None, Duration::from_secs(2)).unwrap();
        let result = transport.send(&HttpRequest::new(Method::GET, "/")).await;
        assert!(matches!(result, Err(TransportError::Connect { ref host, .. }) if host == "127.0.0.1"));
    }
}

//! Authenticated HTTP client with bounded retries
//!
//! Every call returns an [`Envelope`]. Transport errors, error statuses and
//! decode failures are classified into an [`HttpFailure`], logged on the
//! `http` channel and folded into a failed envelope; nothing is raised past
//! this type.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::envelope::Envelope;
use super::failure::HttpFailure;
use super::query::{encode_pairs, Query};
use super::retry::RetryPolicy;
use super::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
use crate::environment::{EnvironmentStore, BASE_AUTH, BASE_URL};
use crate::errors::SgwResult;
use crate::logging::HTTP_CHANNEL;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const PROBE_URI: &str = "/";

/// Timeout and retry settings for [`HttpClient::from_environment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    /// Applied to both connect and the whole exchange
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Per-request options
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
    /// Classify status >= 400 as client/server errors. When off, such
    /// responses become a plain `Request Error <status>` failure.
    pub http_errors: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            query: Vec::new(),
            json: None,
            http_errors: true,
        }
    }
}

impl RequestOptions {
    pub fn with_query(query: &Query) -> Self {
        Self {
            query: encode_pairs(query),
            ..Self::default()
        }
    }

    pub fn with_json(body: Value) -> Self {
        Self {
            json: Some(body),
            ..Self::default()
        }
    }

    pub fn without_http_errors(mut self) -> Self {
        self.http_errors = false;
        self
    }
}

#[derive(Clone)]
pub struct HttpClient {
    transport: Option<Arc<dyn HttpTransport>>,
    retry: RetryPolicy,
    status: bool,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("transport", &self.transport)
            .field("max_attempts", &self.retry.max_attempts)
            .field("status", &self.status)
            .finish()
    }
}

impl HttpClient {
    /// Build from `baseUrl`/`baseAuth` in the store and probe `GET /`.
    ///
    /// A missing `baseUrl` yields a disabled client rather than an error. A
    /// malformed URL or Authorization value is a configuration error.
    pub async fn from_environment(env: &EnvironmentStore, settings: HttpSettings) -> SgwResult<Self> {
        let Some(base_url) = env.get_string(BASE_URL).filter(|u| !u.is_empty()) else {
            info!(target: HTTP_CHANNEL, "baseUrl is not configured, HTTP client disabled");
            return Ok(Self::disabled());
        };
        let auth = env.get_string(BASE_AUTH);

        let transport = ReqwestTransport::new(&base_url, auth.as_deref(), settings.timeout)?;
        Ok(Self::with_transport(Arc::new(transport), settings.retry).await)
    }

    /// Wrap a transport and probe it once; the probe result only feeds `status`
    pub async fn with_transport(transport: Arc<dyn HttpTransport>, retry: RetryPolicy) -> Self {
        let mut client = Self {
            transport: Some(transport),
            retry,
            status: false,
        };
        client.status = client.probe().await;
        client
    }

    pub fn disabled() -> Self {
        Self {
            transport: None,
            retry: RetryPolicy::default(),
            status: false,
        }
    }

    /// Whether the startup probe got a 200
    pub fn status(&self) -> bool {
        self.status
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub async fn get(&self, uri: &str, query: &Query) -> Envelope {
        self.request(Method::GET, uri, RequestOptions::with_query(query), true)
            .await
    }

    /// POST `body` as JSON
    pub async fn post(&self, uri: &str, body: Value) -> Envelope {
        self.request(Method::POST, uri, RequestOptions::with_json(body), true)
            .await
    }

    /// Send one logical request, retrying transient failures.
    ///
    /// With `decode_json` off a successful envelope carries the raw body as a
    /// JSON string.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        options: RequestOptions,
        decode_json: bool,
    ) -> Envelope {
        let outcome = self.execute(method, uri, options, decode_json).await;
        match outcome {
            Ok(data) => Envelope::ok(data),
            Err(failure) => {
                error!(target: HTTP_CHANNEL, uri = uri, status = failure.status(), "{failure}");
                Envelope::from(failure)
            }
        }
    }

    async fn execute(
        &self,
        method: Method,
        uri: &str,
        options: RequestOptions,
        decode_json: bool,
    ) -> Result<Value, HttpFailure> {
        let Some(transport) = &self.transport else {
            return Err(HttpFailure::Other(
                "HTTP client is disabled: baseUrl is not configured".to_string(),
            ));
        };

        let request = HttpRequest {
            method: method.clone(),
            uri: uri.to_string(),
            query: options.query,
            json: options.json,
        };

        let response = self
            .send_with_retry(transport.as_ref(), &request)
            .await
            .map_err(|e| match e {
                TransportError::Connect { host, .. } => HttpFailure::ConnectFailure { host },
                TransportError::Timeout(message) | TransportError::Request(message) => {
                    HttpFailure::RequestFailure { message }
                }
                TransportError::InvalidUrl(message) => HttpFailure::Other(message),
            })?;

        if response.status >= 400 {
            return Err(if !options.http_errors {
                HttpFailure::UnexpectedStatus {
                    status: response.status,
                    reason: response.reason,
                }
            } else if response.status >= 500 {
                HttpFailure::server_error(&method, &response.url, response.status, &response.reason)
            } else {
                HttpFailure::client_error(&method, &response.url, response.status, &response.reason)
            });
        }

        if !decode_json {
            return Ok(Value::String(response.body));
        }

        serde_json::from_str(&response.body).map_err(|e| HttpFailure::DecodeFailure(e.to_string()))
    }

    async fn send_with_retry(
        &self,
        transport: &dyn HttpTransport,
        request: &HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let outcome = transport.send(request).await;

            let retryable = match &outcome {
                Ok(response) => RetryPolicy::is_retryable_status(response.status),
                Err(_) => true,
            };
            if !retryable {
                debug!(target: HTTP_CHANNEL, uri = %request.uri, attempts = attempts, "HTTP exchange complete");
                return outcome;
            }
            if !self.retry.allows_retry(attempts) {
                warn!(
                    target: HTTP_CHANNEL,
                    uri = %request.uri,
                    attempts = attempts,
                    "Exhausted all retries"
                );
                return outcome;
            }

            match &outcome {
                Ok(response) => warn!(
                    target: HTTP_CHANNEL,
                    retry = attempts,
                    max_attempts = self.retry.max_attempts,
                    "[HTTP {}] - Retry to connect {}",
                    response.status,
                    response.url
                ),
                Err(e) => warn!(
                    target: HTTP_CHANNEL,
                    retry = attempts,
                    max_attempts = self.retry.max_attempts,
                    error = %e,
                    "Transport error, will retry {}",
                    request.uri
                ),
            }

            tokio::time::sleep(self.retry.delay_for(attempts)).await;
        }
    }

    async fn probe(&self) -> bool {
        let Some(transport) = &self.transport else {
            return false;
        };
        let request = HttpRequest::new(Method::GET, PROBE_URI);
        match self.send_with_retry(transport.as_ref(), &request).await {
            Ok(response) => {
                let up = response.status == 200;
                if up {
                    info!(target: HTTP_CHANNEL, url = %response.url, "HTTP client connected");
                } else {
                    warn!(target: HTTP_CHANNEL, status = response.status, "Connecting: probe returned non-200");
                }
                up
            }
            Err(e) => {
                warn!(target: HTTP_CHANNEL, "Connecting: {e}");
                false
            }
        }
    }
}

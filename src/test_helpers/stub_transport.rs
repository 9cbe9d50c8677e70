use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::Value;

use crate::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};

pub const STUB_BASE_URL: &str = "https://api.test";

/// One scripted outcome
#[derive(Debug, Clone)]
pub enum StubReply {
    Json(u16, Value),
    Text(u16, String),
    /// Empty body with the given status
    Status(u16),
    ConnectError,
    Timeout,
    /// Panic inside the transport, for exercising unwind handling
    Panic,
}

#[derive(Debug, Default)]
struct StubState {
    scripted: HashMap<String, VecDeque<StubReply>>,
    fallback: HashMap<String, StubReply>,
    requests: Vec<HttpRequest>,
}

/// Scripted [`HttpTransport`].
///
/// Replies are looked up by URI with any leading `/` ignored. Scripted
/// replies are consumed first, then the `always` reply repeats. Unknown URIs
/// answer 404. `GET /` answers 200 until overridden, so the client's probe
/// succeeds by default.
#[derive(Debug, Clone)]
pub struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl StubTransport {
    pub fn new() -> Self {
        let stub = Self {
            state: Arc::new(Mutex::new(StubState::default())),
        };
        stub.always("/", StubReply::Text(200, "OK".to_string()));
        stub
    }

    /// Repeat `reply` for `uri` once any scripted replies are used up
    pub fn always(&self, uri: &str, reply: StubReply) -> &Self {
        self.state.lock().fallback.insert(normalize(uri), reply);
        self
    }

    /// Queue replies for `uri`, consumed in order
    pub fn script(&self, uri: &str, replies: impl IntoIterator<Item = StubReply>) -> &Self {
        self.state
            .lock()
            .scripted
            .entry(normalize(uri))
            .or_default()
            .extend(replies);
        self
    }

    /// Number of requests sent to `uri`
    pub fn calls(&self, uri: &str) -> usize {
        let uri = normalize(uri);
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| normalize(&r.uri) == uri)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().requests.len()
    }

    pub fn last_request(&self, uri: &str) -> Option<HttpRequest> {
        let uri = normalize(uri);
        self.state
            .lock()
            .requests
            .iter()
            .rev()
            .find(|r| normalize(&r.uri) == uri)
            .cloned()
    }

    fn next_reply(&self, request: &HttpRequest) -> Option<StubReply> {
        let key = normalize(&request.uri);
        let mut state = self.state.lock();
        state.requests.push(request.clone());
        if let Some(reply) = state.scripted.get_mut(&key).and_then(VecDeque::pop_front) {
            return Some(reply);
        }
        state.fallback.get(&key).cloned()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{STUB_BASE_URL}/{}", normalize(&request.uri));

        let (status, body) = match self.next_reply(request) {
            Some(StubReply::Json(status, value)) => (status, value.to_string()),
            Some(StubReply::Text(status, body)) => (status, body),
            Some(StubReply::Status(status)) => (status, String::new()),
            Some(StubReply::ConnectError) => {
                return Err(TransportError::Connect {
                    host: "api.test".to_string(),
                    message: "connection refused".to_string(),
                })
            }
            Some(StubReply::Timeout) => {
                return Err(TransportError::Timeout(format!("{url} after 10s")));
            }
            Some(StubReply::Panic) => panic!("stub transport panicked on {url}"),
            None => (404, String::new()),
        };

        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();

        Ok(HttpResponse {
            status,
            reason,
            body,
            url,
        })
    }
}

fn normalize(uri: &str) -> String {
    uri.trim_start_matches('/').to_string()
}

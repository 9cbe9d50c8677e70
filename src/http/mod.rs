//! # HTTP Client
//!
//! Authenticated access to the remote sports-data API.
//!
//! ```text
//! HttpClient::request
//!   └─ send_with_retry ── HttpTransport::send (ReqwestTransport | stub)
//!        retry on transport error or 5xx, linear backoff, 3 attempts
//!   └─ classify ── HttpFailure ── Envelope { success: false, .. }
//!   └─ decode  ── Envelope { success: true, data }
//! ```

pub mod client;
pub mod envelope;
pub mod failure;
pub mod query;
pub mod retry;
pub mod transport;

pub use client::{HttpClient, HttpSettings, RequestOptions, DEFAULT_TIMEOUT};
pub use envelope::Envelope;
pub use failure::HttpFailure;
pub use query::{encode_pairs, encode_query_string, query_from, Query};
pub use retry::RetryPolicy;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

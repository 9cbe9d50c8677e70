//! Classified HTTP failures
//!
//! Each variant renders to the exact message placed in a failed
//! [`Envelope`](super::Envelope).

use reqwest::Method;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpFailure {
    #[error("[ConnectException] - Could not resolve host {host}")]
    ConnectFailure { host: String },

    #[error("[ClientException] - ({status}) - {detail}")]
    ClientError { status: u16, detail: String },

    #[error("[ServerException] - ({status}) - {detail}")]
    ServerError { status: u16, detail: String },

    /// Status >= 400 seen with status-to-error conversion switched off
    #[error("Request Error {status}: {reason}")]
    UnexpectedStatus { status: u16, reason: String },

    #[error("[RequestException] - (0) - {message}")]
    RequestFailure { message: String },

    #[error("[JsonException] - {0}")]
    DecodeFailure(String),

    #[error("[Error] - {0}")]
    Other(String),
}

impl HttpFailure {
    /// 4xx response
    pub fn client_error(method: &Method, url: &str, status: u16, reason: &str) -> Self {
        let detail = match status {
            401 => "Error authenticating, check that baseAuth is set to a valid Authorization value."
                .to_string(),
            404 => format!("{method} {url} path not found."),
            _ => format!(
                "Client error: `{method} {url}` resulted in a `{status} {reason}` response"
            ),
        };
        Self::ClientError { status, detail }
    }

    /// 5xx response
    pub fn server_error(method: &Method, url: &str, status: u16, reason: &str) -> Self {
        let detail = match status {
            500 => format!("{method} {url} internal server error."),
            _ => format!(
                "Server error: `{method} {url}` resulted in a `{status} {reason}` response"
            ),
        };
        Self::ServerError { status, detail }
    }

    /// Status code the failure was classified from, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. }
            | Self::ServerError { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

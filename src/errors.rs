//! Error types for the SportsGateway client.
//!
//! Only configuration misuse surfaces as an `SgwError`. Network and cache
//! failures never cross the client boundary as errors; they are carried by
//! [`Envelope`](crate::http::Envelope) or degrade the cache to disabled.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SgwError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Client already initialized: {0}")]
    AlreadyInitialized(String),
    #[error("Client not initialized: {0}")]
    NotInitialized(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl SgwError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }
}

impl From<serde_json::Error> for SgwError {
    fn from(error: serde_json::Error) -> Self {
        SgwError::ValidationError(format!("JSON serialization error: {error}"))
    }
}

pub type SgwResult<T> = Result<T, SgwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = SgwError::config("baseUrl is not a valid URL");
        assert_eq!(
            err.to_string(),
            "Configuration error: baseUrl is not a valid URL"
        );
    }

    #[test]
    fn test_failed_decode_is_validation_error() {
        let err: SgwError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
        assert!(matches!(err, SgwError::ValidationError(ref m) if m.starts_with("JSON")));
    }
}

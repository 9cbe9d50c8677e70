//! Normalized response shape returned by every network-facing operation

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use super::failure::HttpFailure;
use crate::errors::{SgwError, SgwResult};

/// `{success, message, data}` as handed to every caller.
///
/// A failed envelope always carries a non-empty `message` and an empty
/// object as `data`. A successful one carries an empty `message` and either
/// the decoded JSON payload or the raw body as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            message: String::new(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: json!({}),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Deserialize `data` into a typed response.
    ///
    /// A failed envelope is reported as a validation error carrying its message.
    pub fn decode<T: DeserializeOwned>(&self) -> SgwResult<T> {
        if !self.success {
            return Err(SgwError::ValidationError(format!(
                "cannot decode failed response: {}",
                self.message
            )));
        }
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

impl From<HttpFailure> for Envelope {
    fn from(failure: HttpFailure) -> Self {
        Envelope::failure(failure.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Competition {
        id: u32,
        name: String,
    }

    #[test]
    fn test_failure_has_empty_object_data() {
        let envelope = Envelope::failure("boom");
        assert!(!envelope.success);
        assert_eq!(envelope.message, "boom");
        assert_eq!(envelope.data, json!({}));
    }

    #[test]
    fn test_serialized_shape() {
        let envelope = Envelope::ok(json!({"id": 1, "name": "EPL"}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": "", "data": {"id": 1, "name": "EPL"}})
        );
    }

    #[test]
    fn test_decode_typed_payload() {
        let envelope = Envelope::ok(json!({"id": 1, "name": "EPL"}));
        let competition: Competition = envelope.decode().unwrap();
        assert_eq!(
            competition,
            Competition {
                id: 1,
                name: "EPL".to_string()
            }
        );
    }

    #[test]
    fn test_decode_failed_envelope_is_error() {
        let envelope = Envelope::failure("[ConnectException] - Could not resolve host api.test");
        let result: SgwResult<Competition> = envelope.decode();
        assert!(matches!(result, Err(SgwError::ValidationError(ref m)) if m.contains("api.test")));
    }

    #[test]
    fn test_missing_fields_default_on_read() {
        let envelope: Envelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(envelope.message, "");
        assert_eq!(envelope.data, Value::Null);
    }
}

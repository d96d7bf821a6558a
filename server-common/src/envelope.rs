//! Uniform response envelope for every tool invocation.
//!
//! Every call produces exactly one `CallEnvelope`, whatever happened inside
//! the handler. The shape is the same across all tools:
//!
//! - success: `{ "success": true, "message"?: …, "data"?: … }`
//! - soft failure (the tool reports a condition without failing the call):
//!   `{ "success": false, "message": … }`
//! - hard failure (the handler returned an error): `{ "success": false,
//!   "error": … }`
//!
//! `data` and `error` are mutually exclusive; the constructors below are the
//! only way to build an envelope, so the invariant holds by construction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEnvelope {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallEnvelope {
    /// Successful call carrying a tool-specific payload.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Successful call with no payload, just a human-readable summary.
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Tool-reported failure ("directory not found"). Not a transport error;
    /// the handler completed and chose to report `success: false`.
    pub fn soft_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Hard failure constructed by the dispatcher from a handler error.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Attach a human-readable summary to a success envelope.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let env = CallEnvelope::success(json!({"url": "https://example.com"}));
        let value = serde_json::to_value(&env).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["url"], json!("https://example.com"));
        assert!(value.get("error").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let env = CallEnvelope::failure("boom");
        let value = serde_json::to_value(&env).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("boom"));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_soft_failure_has_no_error_field() {
        let env = CallEnvelope::soft_failure("directory not found: /tmp/missing");
        let value = serde_json::to_value(&env).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["message"], json!("directory not found: /tmp/missing"));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_data_and_error_mutually_exclusive() {
        let success = CallEnvelope::success(json!(1)).with_message("ok");
        assert!(success.data.is_some() && success.error.is_none());

        let failure = CallEnvelope::failure("bad");
        assert!(failure.data.is_none() && failure.error.is_some());
    }

    #[test]
    fn test_roundtrip() {
        let env = CallEnvelope::success(json!({"count": 3})).with_message("listed");
        let back: CallEnvelope =
            serde_json::from_str(&serde_json::to_string(&env).unwrap()).unwrap();
        assert!(back.success);
        assert_eq!(back.message.as_deref(), Some("listed"));
        assert_eq!(back.data.unwrap()["count"], json!(3));
    }
}

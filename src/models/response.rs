//! Vendor response shapes and the uniform tool-boundary envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply from the session-issuance endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionReply {
    pub stat: String,
    #[serde(rename = "userSession")]
    pub user_session: Option<String>,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    pub message: Option<String>,
}

impl SessionReply {
    pub fn is_ok(&self) -> bool {
        self.stat == "Ok"
    }
}

/// Uniform envelope returned by every tool: `{status, data?, message?}`.
///
/// Failures are carried here as `status: "error"` rather than surfaced as
/// protocol-level errors, since each tool invocation is independent and must
/// not take down the hosting process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEnvelope {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ToolEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            status: "success".into(),
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: Value, message: impl Into<String>) -> Self {
        Self {
            status: "success".into(),
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_reply_parses_success_body() {
        let reply: SessionReply =
            serde_json::from_value(json!({"stat": "Ok", "userSession": "tok-abc", "clientId": "C1"}))
                .unwrap();
        assert!(reply.is_ok());
        assert_eq!(reply.user_session.as_deref(), Some("tok-abc"));
    }

    #[test]
    fn session_reply_parses_rejection_body() {
        let reply: SessionReply =
            serde_json::from_value(json!({"stat": "Not_Ok", "message": "invalid checksum"}))
                .unwrap();
        assert!(!reply.is_ok());
        assert_eq!(reply.message.as_deref(), Some("invalid checksum"));
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let ok = serde_json::to_value(ToolEnvelope::success(json!({"x": 1}))).unwrap();
        assert_eq!(ok, json!({"status": "success", "data": {"x": 1}}));

        let err = serde_json::to_value(ToolEnvelope::error("boom")).unwrap();
        assert_eq!(err, json!({"status": "error", "message": "boom"}));
    }
}

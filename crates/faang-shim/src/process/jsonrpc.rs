//! JSON-RPC 2.0 message types for the lifecycle handshake.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC 2.0 request message.
///
/// Ids are assigned by the owning connection; a monotonically increasing
/// per-connection counter is sufficient because ids only need to be unique
/// within one client/server pairing.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// Unique request identifier.
    pub id: i64,
    /// The method to invoke.
    pub method: String,
    /// Optional parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Creates a request with the supplied id.
    #[must_use]
    pub fn new(id: i64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 notification (no response expected).
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcNotification {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// The method to invoke.
    pub method: String,
    /// Optional parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Creates a notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response message.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version.
    pub jsonrpc: String,
    /// Request identifier this response corresponds to.
    pub id: Option<i64>,
    /// The result on success.
    #[serde(default)]
    pub result: Option<Value>,
    /// The error on failure.
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional data.
    #[serde(default)]
    pub data: Option<Value>,
}

/// A request initiated by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcServerRequest {
    /// Request identifier assigned by the server.
    pub id: i64,
    /// The method the server wants invoked.
    pub method: String,
    /// Optional parameters.
    #[serde(default)]
    pub params: Option<Value>,
}

/// A notification sent by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcServerNotification {
    /// The notification method.
    pub method: String,
    /// Optional parameters.
    #[serde(default)]
    pub params: Option<Value>,
}

/// An incoming message classified by shape.
#[derive(Debug, Clone)]
pub enum JsonRpcMessage {
    /// Response to a client-initiated request.
    Response(JsonRpcResponse),
    /// Request initiated by the server.
    ServerRequest(JsonRpcServerRequest),
    /// Notification sent by the server.
    Notification(JsonRpcServerNotification),
}

impl JsonRpcMessage {
    /// Classifies a raw message: a `method` key marks server-initiated
    /// traffic, and an `id` alongside it marks a server request.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        if value.get("method").is_some() {
            if value.get("id").is_some() {
                Ok(Self::ServerRequest(serde_json::from_value(value)?))
            } else {
                Ok(Self::Notification(serde_json::from_value(value)?))
            }
        } else {
            Ok(Self::Response(serde_json::from_value(value)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn serialises_a_request_with_params() {
        let request = JsonRpcRequest::new(1, "initialize", Some(json!({"processId": 42})));

        let encoded = serde_json::to_string(&request).expect("serialization failed");

        assert!(encoded.contains(r#""jsonrpc":"2.0""#));
        assert!(encoded.contains(r#""id":1"#));
        assert!(encoded.contains(r#""method":"initialize""#));
        assert!(encoded.contains(r#""params""#));
    }

    #[rstest]
    fn omits_absent_params() {
        let request = JsonRpcRequest::new(7, "shutdown", None);

        let encoded = serde_json::to_string(&request).expect("serialization failed");

        assert!(encoded.contains(r#""id":7"#));
        assert!(!encoded.contains("params"));
    }

    #[rstest]
    fn serialises_a_notification_without_an_id() {
        let notification = JsonRpcNotification::new("initialized", Some(json!({})));

        let encoded = serde_json::to_string(&notification).expect("serialization failed");

        assert!(encoded.contains(r#""method":"initialized""#));
        assert!(!encoded.contains("id"));
    }

    #[rstest]
    fn deserialises_a_success_response() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"result":{"capabilities":{}}}"#;

        let response: JsonRpcResponse = serde_json::from_str(raw).expect("parse failed");

        assert_eq!(response.id, Some(1));
        assert!(response.result.is_some());
        assert!(response.error.is_none());
    }

    #[rstest]
    fn deserialises_an_error_response() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32600,"message":"Invalid request"}}"#;

        let response: JsonRpcResponse = serde_json::from_str(raw).expect("parse failed");
        let error = response.error.expect("error missing");

        assert_eq!(error.code, -32600);
        assert_eq!(error.message, "Invalid request");
    }

    #[rstest]
    fn classifies_a_response() {
        let raw = br#"{"jsonrpc":"2.0","id":3,"result":null}"#;

        let message = JsonRpcMessage::from_bytes(raw).expect("classification failed");

        assert!(matches!(
            message,
            JsonRpcMessage::Response(JsonRpcResponse { id: Some(3), .. })
        ));
    }

    #[rstest]
    fn classifies_a_server_request() {
        let raw = br#"{"jsonrpc":"2.0","id":9,"method":"workspace/configuration","params":{}}"#;

        let message = JsonRpcMessage::from_bytes(raw).expect("classification failed");

        match message {
            JsonRpcMessage::ServerRequest(request) => {
                assert_eq!(request.id, 9);
                assert_eq!(request.method, "workspace/configuration");
            }
            other => panic!("expected server request, got {other:?}"),
        }
    }

    #[rstest]
    fn classifies_a_server_notification() {
        let raw = br#"{"jsonrpc":"2.0","method":"window/logMessage","params":{"type":3}}"#;

        let message = JsonRpcMessage::from_bytes(raw).expect("classification failed");

        match message {
            JsonRpcMessage::Notification(notification) => {
                assert_eq!(notification.method, "window/logMessage");
            }
            other => panic!("expected notification, got {other:?}"),
        }
    }
}

// ABOUTME: Chat service wire types and the ChatApi seam between transport and HTTP.
// ABOUTME: Requests carry user text, session id and a fresh per-call request id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::error::TransportError;
use crate::session::SessionId;

/// Header carrying the same value as the body's `request_id`.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Body of `POST {base}/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_input: String,
    pub session_id: String,
    pub request_id: String,
}

impl ChatRequest {
    /// Build a request with a freshly generated request id.
    pub fn new(user_input: &str, session: &SessionId) -> Self {
        Self {
            user_input: user_input.to_string(),
            session_id: session.as_str().to_string(),
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Success body of `POST {base}/chat`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Failure body; `error` is shown verbatim when present.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Extract the server-supplied error message from a failure body, if any.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

/// The remote chat service. `HttpChatApi` is the production implementation;
/// tests substitute scripted fakes.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `GET {base}/health`. Ok only for a 2xx answer.
    async fn health(&self) -> Result<(), TransportError>;

    /// `POST {base}/chat`. One request, one response; no retries.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_expected_fields() {
        let session = SessionId::generate();
        let req = ChatRequest::new("hello", &session);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["user_input"], "hello");
        assert_eq!(json["session_id"], session.as_str());
        assert_eq!(json["request_id"], req.request_id.as_str());
    }

    #[test]
    fn request_ids_are_fresh_per_call() {
        let session = SessionId::generate();
        let a = ChatRequest::new("x", &session);
        let b = ChatRequest::new("x", &session);
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.session_id, b.session_id);
    }

    #[test]
    fn response_accepts_optional_timestamp() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"response":"hi","timestamp":"2025-01-01T00:00:00"}"#)
                .unwrap();
        assert_eq!(resp.response, "hi");
        assert_eq!(resp.timestamp.as_deref(), Some("2025-01-01T00:00:00"));

        let bare: ChatResponse = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        assert!(bare.timestamp.is_none());
    }

    #[test]
    fn error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error":"Endpoint tidak ditemukan"}"#),
            Some("Endpoint tidak ditemukan".to_string())
        );
        assert_eq!(error_message(r#"{"error":""}"#), None);
        assert_eq!(error_message(r#"{"detail":"x"}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(""), None);
    }
}

// ABOUTME: Message transport — one gated, time-limited chat exchange per call.
// ABOUTME: Short-circuits when offline and races the request against a client-side deadline.

use std::sync::Arc;
use std::time::Duration;

use crate::client::api::{ChatApi, ChatRequest};
use crate::client::error::TransportError;
use crate::monitor::Connectivity;
use crate::session::SessionId;

/// Sends user text to the chat service on behalf of the sequencer.
pub struct Transport {
    api: Arc<dyn ChatApi>,
    connectivity: Connectivity,
    deadline: Duration,
}

impl Transport {
    pub fn new(api: Arc<dyn ChatApi>, connectivity: Connectivity, deadline: Duration) -> Self {
        Self {
            api,
            connectivity,
            deadline,
        }
    }

    /// Perform one exchange and return the server's response text.
    ///
    /// When the deadline wins the race the request future is dropped, so a
    /// late answer can never be observed.
    pub async fn send(&self, text: &str, session: &SessionId) -> Result<String, TransportError> {
        if !self.connectivity.is_connected() {
            return Err(TransportError::Unavailable);
        }

        let request = ChatRequest::new(text, session);
        tracing::debug!(
            request_id = %request.request_id,
            session_id = %session,
            chars = text.chars().count(),
            "sending chat message"
        );

        match tokio::time::timeout(self.deadline, self.api.chat(&request)).await {
            Ok(Ok(response)) => {
                tracing::debug!(
                    request_id = %request.request_id,
                    server_timestamp = response.timestamp.as_deref().unwrap_or("-"),
                    "chat response received"
                );
                Ok(response.response)
            }
            Ok(Err(e)) => {
                tracing::warn!(request_id = %request.request_id, error = %e, "chat request rejected");
                Err(e)
            }
            Err(_) => {
                tracing::warn!(request_id = %request.request_id, "chat request timed out");
                Err(TransportError::Timeout(self.deadline))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::client::ChatResponse;

    enum Reply {
        Text(&'static str),
        Fail(Option<&'static str>),
        After(Duration, &'static str),
    }

    struct OneShot {
        reply: Reply,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl OneShot {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatApi for OneShot {
        async fn health(&self) -> Result<(), TransportError> {
            Ok(())
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            let text = match self.reply {
                Reply::Text(t) => t,
                Reply::Fail(msg) => {
                    return Err(TransportError::Rejected {
                        status: Some(500),
                        message: msg.map(str::to_string),
                    });
                }
                Reply::After(delay, t) => {
                    tokio::time::sleep(delay).await;
                    t
                }
            };
            Ok(ChatResponse {
                response: text.to_string(),
                timestamp: None,
            })
        }
    }

    fn transport(api: Arc<OneShot>, connected: bool) -> (Transport, tokio::sync::watch::Sender<bool>) {
        let (tx, connectivity) = Connectivity::channel(connected);
        (
            Transport::new(api, connectivity, Duration::from_secs(30)),
            tx,
        )
    }

    #[tokio::test]
    async fn offline_short_circuits_without_network() {
        let api = OneShot::new(Reply::Text("hi"));
        let (transport, _tx) = transport(api.clone(), false);
        let result = transport.send("hello", &SessionId::generate()).await;
        assert_eq!(result, Err(TransportError::Unavailable));
        assert!(api.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_returns_response_text_and_carries_session() {
        let api = OneShot::new(Reply::Text("hi"));
        let (transport, _tx) = transport(api.clone(), true);
        let session = SessionId::generate();

        let result = transport.send("hello", &session).await;
        assert_eq!(result, Ok("hi".to_string()));

        let seen = api.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].user_input, "hello");
        assert_eq!(seen[0].session_id, session.as_str());
        assert!(!seen[0].request_id.is_empty());
    }

    #[tokio::test]
    async fn rejection_is_passed_through() {
        let api = OneShot::new(Reply::Fail(Some("quota exceeded")));
        let (transport, _tx) = transport(api, true);
        let err = transport
            .send("hello", &SessionId::generate())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_server_times_out_at_deadline() {
        let api = OneShot::new(Reply::After(Duration::from_secs(31), "late"));
        let (transport, _tx) = transport(api, true);

        let started = tokio::time::Instant::now();
        let result = transport.send("hello", &SessionId::generate()).await;
        assert_eq!(result, Err(TransportError::Timeout(Duration::from_secs(30))));
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn answer_just_inside_deadline_succeeds() {
        let api = OneShot::new(Reply::After(Duration::from_secs(29), "made it"));
        let (transport, _tx) = transport(api, true);
        let result = transport.send("hello", &SessionId::generate()).await;
        assert_eq!(result, Ok("made it".to_string()));
    }
}

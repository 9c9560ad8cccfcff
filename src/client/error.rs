// ABOUTME: Transport error taxonomy — unavailable, rejected by the server, or timed out.
// ABOUTME: The Display text of each variant is what the error banner shows.

use std::time::Duration;

use thiserror::Error;

/// Why a chat exchange failed. None of these are fatal to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connectivity monitor reports the server as down; nothing was sent.
    #[error("Server unavailable. Unable to send message.")]
    Unavailable,

    /// The server answered with a failure, or the exchange broke mid-way.
    #[error("{}", .message.as_deref().unwrap_or("Error sending message"))]
    Rejected {
        status: Option<u16>,
        message: Option<String>,
    },

    /// No response within the client-side deadline.
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl TransportError {
    /// A failure with no server-supplied detail (network error, undecodable body).
    pub fn broken() -> Self {
        Self::Rejected {
            status: None,
            message: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        tracing::warn!(error = %err, "chat request failed");
        Self::Rejected {
            status: err.status().map(|s| s.as_u16()),
            message: None,
        }
    }
}

// ABOUTME: Client module — chat service wire types, HTTP implementation, and the transport.
// ABOUTME: Everything that talks to the remote service lives here.

pub mod api;
pub mod error;
pub mod http;
pub mod transport;

pub use api::{ChatApi, ChatRequest, ChatResponse, REQUEST_ID_HEADER};
pub use error::TransportError;
pub use http::HttpChatApi;
pub use transport::Transport;

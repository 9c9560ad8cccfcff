// ABOUTME: Session module — identity of one conversation with the chat service.
// ABOUTME: Holds the per-run session token; nothing here is persisted.

pub mod id;

pub use id::SessionId;

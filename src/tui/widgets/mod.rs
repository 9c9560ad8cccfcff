// ABOUTME: TUI widget sub-modules for the transcript, error banners, and status bar.
// ABOUTME: Each widget is a pure rendering function over parts of TuiState.

pub mod banner;
pub mod chat;
pub mod status;

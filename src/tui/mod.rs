// ABOUTME: TUI module — ratatui full-screen interface for chatline.
// ABOUTME: Transcript display, input handling, error banners, and status bar.

pub mod banners;
pub mod input;
pub mod state;
pub mod ui;
pub mod widgets;

pub use state::*;

// ABOUTME: Library root for chatline — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod logging;
pub mod markdown;
pub mod monitor;
pub mod sequencer;
pub mod session;
pub mod tui;
pub mod view;

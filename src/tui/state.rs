// ABOUTME: TUI state — transcript, input buffer, typing indicator, banners and connection status.
// ABOUTME: Implements ConversationView so the chat controller drives it directly.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::markdown::MarkdownRenderer;
use crate::session::SessionId;
use crate::tui::banners::BannerQueue;
use crate::view::{ConversationView, TurnKind};

const DEFAULT_BANNER_TTL: Duration = Duration::from_secs(5);

/// A single entry in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub kind: TurnKind,
    pub text: String,
    pub at: DateTime<Local>,
}

/// Full TUI application state for one conversation.
pub struct TuiState {
    pub turns: Vec<Turn>,
    pub input: String,
    pub cursor_pos: usize,
    pub scroll_offset: u16,
    pub typing: bool,
    pub connected: bool,
    pub queued: usize,
    pub banners: BannerQueue,
    pub session_label: String,
    pub server: String,
    pub suggestions: Vec<String>,
    pub renderer: Arc<dyn MarkdownRenderer>,
}

impl TuiState {
    /// Create an empty conversation view for the given session and server.
    pub fn new(session: &SessionId, server: &str, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        Self {
            turns: Vec::new(),
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            typing: false,
            connected: false,
            queued: 0,
            banners: BannerQueue::new(DEFAULT_BANNER_TTL),
            session_label: session.short().to_string(),
            server: server.to_string(),
            suggestions: Vec::new(),
            renderer,
        }
    }

    pub fn with_banner_ttl(mut self, ttl: Duration) -> Self {
        self.banners = BannerQueue::new(ttl);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Whether Enter would submit: connected and the input is not blank.
    pub fn send_enabled(&self) -> bool {
        self.connected && !self.input.trim().is_empty()
    }

    /// The trimmed input if it may be submitted. Does not clear the buffer;
    /// the controller does that once the submission is accepted.
    pub fn pending_submission(&self) -> Option<String> {
        self.send_enabled().then(|| self.input.trim().to_string())
    }

    /// Replace the input buffer and put the cursor at its end.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor_pos = self.input_char_len();
    }

    /// Drop banners whose time is up. Returns whether a redraw is needed.
    pub fn prune_banners(&mut self, now: Instant) -> bool {
        self.banners.prune(now)
    }

    /// Clamp the cursor position to the valid character range of the input buffer.
    pub fn clamp_cursor(&mut self) {
        self.cursor_pos = self.cursor_pos.min(self.input_char_len());
    }

    /// Return the current cursor byte index in the UTF-8 input buffer.
    pub fn cursor_byte_index(&self) -> usize {
        char_index_to_byte_index(&self.input, self.cursor_pos)
    }

    /// Return the total number of characters in the input buffer.
    pub fn input_char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor and advance by one character.
    pub fn insert_char_at_cursor(&mut self, c: char) {
        self.clamp_cursor();
        let byte_index = self.cursor_byte_index();
        self.input.insert(byte_index, c);
        self.cursor_pos += 1;
    }

    /// Insert a string at the cursor (paste). Newlines become spaces.
    pub fn insert_str_at_cursor(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char_at_cursor(if c == '\n' || c == '\r' { ' ' } else { c });
        }
    }

    /// Delete the character before the cursor (backspace behavior).
    pub fn backspace_char(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos == 0 {
            return;
        }

        let end = self.cursor_byte_index();
        let start = char_index_to_byte_index(&self.input, self.cursor_pos - 1);
        self.input.replace_range(start..end, "");
        self.cursor_pos -= 1;
    }

    /// Delete the character at the cursor (delete behavior).
    pub fn delete_char_at_cursor(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos >= self.input_char_len() {
            return;
        }

        let start = self.cursor_byte_index();
        let end = char_index_to_byte_index(&self.input, self.cursor_pos + 1);
        self.input.replace_range(start..end, "");
    }

    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos < self.input_char_len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input_char_len();
    }
}

impl ConversationView for TuiState {
    fn append_turn(&mut self, kind: TurnKind, text: String) {
        self.turns.push(Turn {
            kind,
            text,
            at: Local::now(),
        });
        self.scroll_offset = 0;
    }

    fn show_typing(&mut self) {
        self.typing = true;
        self.scroll_offset = 0;
    }

    fn hide_typing(&mut self) {
        self.typing = false;
    }

    fn show_error(&mut self, text: String) {
        self.banners.push_at(text, Instant::now());
        self.scroll_offset = 0;
    }

    fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    fn set_queued(&mut self, queued: usize) {
        self.queued = queued;
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }
}

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    match s.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}

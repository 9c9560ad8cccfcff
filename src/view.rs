// ABOUTME: Conversation view seam — what the submission pipeline needs from a display.
// ABOUTME: The TUI implements it; tests substitute a recording view.

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    User,
    Bot,
}

/// Display operations driven by the sequencer's effects.
pub trait ConversationView {
    /// Append a transcript entry. Bot entries are rendered as Markdown.
    fn append_turn(&mut self, kind: TurnKind, text: String);

    /// Show the single typing indicator.
    fn show_typing(&mut self);

    /// Remove the typing indicator. A no-op when it is not shown.
    fn hide_typing(&mut self);

    /// Show a transient error banner that removes itself after a fixed delay.
    fn show_error(&mut self, text: String);

    /// Update the connection status affordance.
    fn set_connected(&mut self, connected: bool);

    /// Number of submissions waiting behind the one in flight.
    fn set_queued(&mut self, queued: usize);

    /// Empty the input box after a submission was accepted.
    fn clear_input(&mut self);
}

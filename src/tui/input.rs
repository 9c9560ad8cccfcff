// ABOUTME: Keyboard input handling for the TUI — translates key events into actions.
// ABOUTME: Editing keys change the buffer; Enter and F-keys produce submissions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::state::TuiState;

/// The result of processing a key event.
#[derive(Debug, PartialEq)]
pub enum InputResult {
    /// No action needed.
    None,
    /// Submit this text to the sequencer.
    Send(String),
    /// Discard the conversation and start over with a new session.
    NewChat,
    /// User wants to quit.
    Quit,
}

/// Process a key event against the current TUI state and return the resulting action.
pub fn handle_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return InputResult::Quit,
            KeyCode::Char('n') => return InputResult::NewChat,
            KeyCode::Char('u') => {
                state.input.clear();
                state.cursor_pos = 0;
                return InputResult::None;
            }
            KeyCode::Char(_) => return InputResult::None,
            _ => {}
        }
    }

    if handle_scroll_key(state, key.code) {
        return InputResult::None;
    }

    match key.code {
        KeyCode::Enter => state
            .pending_submission()
            .map_or(InputResult::None, InputResult::Send),
        KeyCode::F(n) => submit_suggestion(state, n),
        KeyCode::Char(c) => {
            state.insert_char_at_cursor(c);
            InputResult::None
        }
        KeyCode::Backspace => {
            state.backspace_char();
            InputResult::None
        }
        KeyCode::Delete => {
            state.delete_char_at_cursor();
            InputResult::None
        }
        KeyCode::Left => {
            state.move_cursor_left();
            InputResult::None
        }
        KeyCode::Right => {
            state.move_cursor_right();
            InputResult::None
        }
        KeyCode::Home => {
            state.move_cursor_home();
            InputResult::None
        }
        KeyCode::End => {
            state.move_cursor_end();
            InputResult::None
        }
        KeyCode::Esc => InputResult::Quit,
        _ => InputResult::None,
    }
}

/// Suggestions are only offered while the transcript is empty.
fn submit_suggestion(state: &mut TuiState, n: u8) -> InputResult {
    if !state.turns.is_empty() || n == 0 {
        return InputResult::None;
    }
    let Some(suggestion) = state.suggestions.get(usize::from(n) - 1).cloned() else {
        return InputResult::None;
    };
    state.set_input(&suggestion);
    state
        .pending_submission()
        .map_or(InputResult::None, InputResult::Send)
}

fn handle_scroll_key(state: &mut TuiState, key: KeyCode) -> bool {
    match key {
        KeyCode::PageUp => {
            state.scroll_offset = state.scroll_offset.saturating_add(10);
            true
        }
        KeyCode::PageDown => {
            state.scroll_offset = state.scroll_offset.saturating_sub(10);
            true
        }
        KeyCode::Up => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
            true
        }
        KeyCode::Down => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::markdown::InlineRenderer;
    use crate::session::SessionId;
    use crate::view::{ConversationView, TurnKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn online_state() -> TuiState {
        let mut state = TuiState::new(
            &SessionId::generate(),
            "http://localhost:5000",
            Arc::new(InlineRenderer),
        )
        .with_suggestions(vec!["What is this?".to_string(), "Help".to_string()]);
        state.set_connected(true);
        state
    }

    fn type_text(state: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_key(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_then_enter_sends_trimmed_text() {
        let mut state = online_state();
        type_text(&mut state, " hello ");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), InputResult::Send("hello".to_string()));
        // The buffer is cleared by the controller, not by the key handler.
        assert_eq!(state.input, " hello ");
    }

    #[test]
    fn enter_does_nothing_when_offline() {
        let mut state = online_state();
        state.set_connected(false);
        type_text(&mut state, "hello");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), InputResult::None);
        assert_eq!(state.input, "hello");
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let mut state = online_state();
        type_text(&mut state, "   ");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), InputResult::None);
    }

    #[test]
    fn control_keys() {
        let mut state = online_state();
        assert_eq!(handle_key(&mut state, ctrl('c')), InputResult::Quit);
        assert_eq!(handle_key(&mut state, ctrl('n')), InputResult::NewChat);
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), InputResult::Quit);

        type_text(&mut state, "draft");
        assert_eq!(handle_key(&mut state, ctrl('u')), InputResult::None);
        assert_eq!(state.input, "");
    }

    #[test]
    fn unbound_control_chords_do_not_type() {
        let mut state = online_state();
        type_text(&mut state, "hi");
        for c in ['a', 'e', 'k', 'w'] {
            assert_eq!(handle_key(&mut state, ctrl(c)), InputResult::None);
        }
        assert_eq!(state.input, "hi");
        assert_eq!(state.cursor_pos, 2);
    }

    #[test]
    fn function_key_submits_suggestion_on_empty_chat() {
        let mut state = online_state();
        assert_eq!(
            handle_key(&mut state, key(KeyCode::F(2))),
            InputResult::Send("Help".to_string())
        );
        assert_eq!(state.input, "Help");
        assert_eq!(handle_key(&mut state, key(KeyCode::F(9))), InputResult::None);
    }

    #[test]
    fn suggestions_are_gone_once_chat_started() {
        let mut state = online_state();
        state.append_turn(TurnKind::User, "hi".to_string());
        assert_eq!(handle_key(&mut state, key(KeyCode::F(1))), InputResult::None);
    }

    #[test]
    fn scroll_keys_adjust_offset() {
        let mut state = online_state();
        handle_key(&mut state, key(KeyCode::PageUp));
        assert_eq!(state.scroll_offset, 10);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.scroll_offset, 9);
        handle_key(&mut state, key(KeyCode::PageDown));
        handle_key(&mut state, key(KeyCode::PageDown));
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn cursor_editing() {
        let mut state = online_state();
        type_text(&mut state, "helo");
        handle_key(&mut state, key(KeyCode::Left));
        handle_key(&mut state, key(KeyCode::Char('l')));
        assert_eq!(state.input, "hello");
        handle_key(&mut state, key(KeyCode::Home));
        handle_key(&mut state, key(KeyCode::Delete));
        assert_eq!(state.input, "ello");
        handle_key(&mut state, key(KeyCode::End));
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.input, "ell");
    }
}

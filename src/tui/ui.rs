// ABOUTME: Main TUI rendering function — assembles header, chat, banners, input, and status bar.
// ABOUTME: Splits the terminal frame into vertical layout chunks and delegates to widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::state::TuiState;
use crate::tui::widgets::banner::banner_lines;
use crate::tui::widgets::chat::{render_chat_lines, welcome_lines};
use crate::tui::widgets::status::{StatusBarParams, status_line};

// Banners beyond this many rows are still live, just not drawn.
const MAX_BANNER_HEIGHT: u16 = 3;

/// Render the full TUI screen layout to the given frame.
pub fn render(frame: &mut Frame, state: &mut TuiState) {
    let area = frame.area();

    let banner_height = (state.banners.len() as u16).min(MAX_BANNER_HEIGHT);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Min(3),                // Chat area
            Constraint::Length(banner_height), // Error banners
            Constraint::Length(3),             // Input area
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    // Header
    let header = Line::from(vec![
        Span::styled(
            " chatline",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Enter send · Ctrl+N new chat · Esc quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    // Chat area
    let chat_lines = if state.turns.is_empty() && !state.typing {
        welcome_lines(&state.suggestions)
    } else {
        render_chat_lines(&state.turns, state.typing, state.renderer.as_ref())
    };

    let chat_chunk = chunks[1];
    let visible_height = chat_chunk.height;

    // ratatui's own line_count() matches its wrapping exactly, so the bottom
    // of the transcript is never cut off.
    let chat_paragraph = Paragraph::new(chat_lines).wrap(Wrap { trim: false });
    let total_lines = chat_paragraph.line_count(chat_chunk.width) as u16;
    let max_scroll = total_lines.saturating_sub(visible_height);

    if state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    // scroll_offset is lines scrolled up from the bottom (0 = at bottom)
    let scroll = max_scroll.saturating_sub(state.scroll_offset);
    frame.render_widget(chat_paragraph.scroll((scroll, 0)), chat_chunk);

    // Error banners
    if banner_height > 0 {
        frame.render_widget(Paragraph::new(banner_lines(&state.banners)), chunks[2]);
    }

    // Input area. The title doubles as the send affordance.
    let input_chunk = chunks[3];
    let (title, title_style, border_style) = if !state.connected {
        (
            " offline - sending disabled ",
            Style::default().fg(Color::Red),
            Style::default().fg(Color::DarkGray),
        )
    } else if state.send_enabled() {
        (
            " Enter to send ",
            Style::default().fg(Color::Green),
            Style::default(),
        )
    } else {
        (
            " type a message ",
            Style::default().fg(Color::DarkGray),
            Style::default(),
        )
    };

    let input_block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(border_style)
        .title(Span::styled(title, title_style));

    let input_style = if state.connected {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input = Paragraph::new(Span::styled(state.input.clone(), input_style)).block(input_block);
    frame.render_widget(input, input_chunk);

    if input_chunk.width > 0 && input_chunk.height > 1 {
        state.clamp_cursor();

        let prefix: String = state.input.chars().take(state.cursor_pos).collect();
        let visual_col = UnicodeWidthStr::width(prefix.as_str());
        let max_visual_col = input_chunk.width.saturating_sub(1) as usize;
        let cursor_x = input_chunk
            .x
            .saturating_add(visual_col.min(max_visual_col) as u16);
        // +1 for the top border.
        let cursor_y = input_chunk.y.saturating_add(1);
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }

    // Status bar
    let status = status_line(&StatusBarParams {
        connected: state.connected,
        server: &state.server,
        session: &state.session_label,
        typing: state.typing,
        queued: state.queued,
    });
    frame.render_widget(Paragraph::new(status), chunks[4]);
}

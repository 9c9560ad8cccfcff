// ABOUTME: Status bar widget — connection state, server, session and pipeline activity.
// ABOUTME: Displayed at the bottom of the TUI as a single-line summary.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Inputs for the status bar.
pub struct StatusBarParams<'a> {
    pub connected: bool,
    pub server: &'a str,
    pub session: &'a str,
    pub typing: bool,
    pub queued: usize,
}

/// Render the status bar line.
pub fn status_line(params: &StatusBarParams<'_>) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let (dot, label, color) = if params.connected {
        ("●", "Online", Color::Green)
    } else {
        ("●", "Offline", Color::Red)
    };

    let mut spans = vec![
        Span::styled(format!(" {} {} ", dot, label), Style::default().fg(color)),
        Span::styled("| ", dim),
        Span::styled(format!("{} ", params.server), Style::default().fg(Color::Cyan)),
        Span::styled("| ", dim),
        Span::styled(
            format!("session {} ", params.session),
            Style::default().fg(Color::White),
        ),
    ];

    if params.typing {
        spans.push(Span::styled("| ", dim));
        spans.push(Span::styled("sending... ", Style::default().fg(Color::Yellow)));
    }

    if params.queued > 0 {
        spans.push(Span::styled("| ", dim));
        spans.push(Span::styled(
            format!("{} queued ", params.queued),
            Style::default().fg(Color::Yellow),
        ));
    }

    Line::from(spans)
}

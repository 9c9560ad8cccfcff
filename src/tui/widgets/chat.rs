// ABOUTME: Chat widget — renders transcript turns into styled ratatui Lines.
// ABOUTME: User turns get the minimal inline formatter; bot turns go through the configured renderer.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markdown::{InlineRenderer, MarkdownRenderer};
use crate::tui::state::Turn;
use crate::view::TurnKind;

const CONTINUATION_INDENT: &str = "  ";

/// Render transcript turns into styled Lines, with a typing line when a reply is pending.
pub fn render_chat_lines(
    turns: &[Turn],
    typing: bool,
    renderer: &dyn MarkdownRenderer,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (idx, turn) in turns.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }

        match turn.kind {
            TurnKind::User => {
                // User text only gets the minimal inline styles.
                for (i, rendered) in InlineRenderer.render(&turn.text).into_iter().enumerate() {
                    let prefix = if i == 0 {
                        Span::styled(
                            "❯ ",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::raw(CONTINUATION_INDENT)
                    };
                    let mut spans = vec![prefix];
                    spans.extend(rendered.spans);
                    lines.push(Line::from(spans));
                }
            }
            TurnKind::Bot => {
                // First line gets the prefix, the rest are indented under it.
                for (i, rendered) in renderer.render(&turn.text).into_iter().enumerate() {
                    let prefix = if i == 0 {
                        Span::styled(
                            "⏺ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::raw(CONTINUATION_INDENT)
                    };
                    let mut spans = vec![prefix];
                    spans.extend(rendered.spans);
                    lines.push(Line::from(spans));
                }
            }
        }

        lines.push(Line::from(Span::styled(
            format!("  {}", turn.at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if typing {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(typing_line());
    }

    lines
}

/// The single "bot is typing" indicator.
pub fn typing_line() -> Line<'static> {
    Line::from(vec![
        Span::styled(
            "⏺ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "typing...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}

/// Welcome text and numbered suggestions shown while the transcript is empty.
pub fn welcome_lines(suggestions: &[String]) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Welcome! Ask a question to start the conversation.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if !suggestions.is_empty() {
        lines.push(Line::from(Span::styled(
            "Suggestions:",
            Style::default().fg(Color::DarkGray),
        )));
        for (i, suggestion) in suggestions.iter().take(12).enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  F{} ", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(suggestion.clone()),
            ]));
        }
    }

    lines
}

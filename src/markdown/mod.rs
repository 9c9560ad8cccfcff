// ABOUTME: Markdown rendering for bot turns — a pluggable renderer producing styled ratatui Lines.
// ABOUTME: RichRenderer handles block and inline Markdown; InlineRenderer is the minimal fallback.

mod fallback;
mod regexes;
mod rich;

use std::sync::Arc;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub use fallback::InlineRenderer;
pub use rich::RichRenderer;

/// Converts Markdown text into display lines.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, text: &str) -> Vec<Line<'static>>;
}

/// Pick the full renderer, or the fallback when rich rendering is disabled.
pub fn renderer(rich: bool) -> Arc<dyn MarkdownRenderer> {
    if rich {
        Arc::new(RichRenderer)
    } else {
        Arc::new(InlineRenderer)
    }
}

/// Strip control characters other than newline and tab so server text can
/// never drive the terminal. CRLF becomes LF.
pub fn sanitize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Link targets shown to the user; anything else renders as plain text.
pub(crate) fn is_safe_link(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

pub(crate) fn code_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub(crate) fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

/// Collect a line's text content, ignoring styles.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s: &Span<'_>| s.content.as_ref()).collect()
}

// ABOUTME: Minimal inline formatter used when full Markdown rendering is off.
// ABOUTME: Handles line breaks, **bold**, *italic* and `code`; everything else stays literal.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::regexes::re_inline_minimal;
use super::{MarkdownRenderer, code_style, sanitize};

#[derive(Debug, Default, Clone, Copy)]
pub struct InlineRenderer;

impl MarkdownRenderer for InlineRenderer {
    fn render(&self, text: &str) -> Vec<Line<'static>> {
        sanitize(text).split('\n').map(render_line).collect()
    }
}

fn render_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in re_inline_minimal().captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::raw(line[last..whole.start()].to_string()));
        }
        if let Some(m) = caps.name("bold") {
            spans.push(Span::styled(
                m.as_str().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        } else if let Some(m) = caps.name("italic") {
            spans.push(Span::styled(
                m.as_str().to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(m) = caps.name("code") {
            spans.push(Span::styled(m.as_str().to_string(), code_style()));
        }
        last = whole.end();
    }

    if last < line.len() {
        spans.push(Span::raw(line[last..].to_string()));
    }
    Line::from(spans)
}

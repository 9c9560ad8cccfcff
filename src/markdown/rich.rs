// ABOUTME: Full Markdown renderer — headings, lists, quotes, rules, fenced code and inline styles.
// ABOUTME: Links keep their target visible; unsafe schemes lose the target entirely.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::regexes::{
    re_blockquote, re_bullet, re_fence, re_heading, re_inline, re_ordered, re_rule,
};
use super::{MarkdownRenderer, code_style, is_safe_link, link_style, sanitize};

const RULE_WIDTH: usize = 40;

#[derive(Debug, Default, Clone, Copy)]
pub struct RichRenderer;

impl MarkdownRenderer for RichRenderer {
    fn render(&self, text: &str) -> Vec<Line<'static>> {
        let text = sanitize(text);
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut fence: Option<String> = None;

        for raw in text.split('\n') {
            if let Some(marker) = &fence {
                let closes = re_fence()
                    .captures(raw)
                    .is_some_and(|c| &c[1] == marker.as_str() && c[2].is_empty());
                if closes {
                    fence = None;
                } else {
                    lines.push(Line::from(Span::styled(format!("  {raw}"), code_style())));
                }
                continue;
            }

            if let Some(caps) = re_fence().captures(raw) {
                fence = Some(caps[1].to_string());
                continue;
            }

            if raw.trim().is_empty() {
                if lines.last().is_some_and(|l| !l.spans.is_empty()) {
                    lines.push(Line::default());
                }
                continue;
            }

            lines.push(render_block_line(raw));
        }

        while lines.last().is_some_and(|l| l.spans.is_empty()) {
            lines.pop();
        }
        lines
    }
}

fn render_block_line(line: &str) -> Line<'static> {
    if let Some(caps) = re_heading().captures(line) {
        let level = caps[1].len();
        let color = match level {
            1 => Color::Magenta,
            2 => Color::Cyan,
            _ => Color::Blue,
        };
        let base = Style::default().fg(color).add_modifier(Modifier::BOLD);
        return Line::from(render_inline(&caps[2], base));
    }

    // Before bullets: "---" and "* * *" would otherwise read as list items.
    if re_rule().is_match(line) {
        return Line::from(Span::styled(
            "─".repeat(RULE_WIDTH),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(caps) = re_blockquote().captures(line) {
        let mut spans = vec![Span::styled("│ ", Style::default().fg(Color::DarkGray))];
        spans.extend(render_inline(
            &caps[1],
            Style::default().add_modifier(Modifier::ITALIC),
        ));
        return Line::from(spans);
    }

    if let Some(caps) = re_bullet().captures(line) {
        let mut spans = vec![Span::raw(format!("{}• ", &caps[1]))];
        spans.extend(render_inline(&caps[2], Style::default()));
        return Line::from(spans);
    }

    if let Some(caps) = re_ordered().captures(line) {
        let mut spans = vec![Span::raw(format!("{}{} ", &caps[1], &caps[2]))];
        spans.extend(render_inline(&caps[3], Style::default()));
        return Line::from(spans);
    }

    Line::from(render_inline(line, Style::default()))
}

/// Split a line into styled spans. Unstyled text takes `base`.
fn render_inline(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in re_inline().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::styled(text[last..whole.start()].to_string(), base));
        }

        if let Some(m) = caps.name("code") {
            spans.push(Span::styled(m.as_str().to_string(), code_style()));
        } else if let (Some(label), Some(url)) = (caps.name("link_text"), caps.name("link_url")) {
            if is_safe_link(url.as_str()) {
                spans.push(Span::styled(label.as_str().to_string(), link_style()));
                spans.push(Span::styled(
                    format!(" <{}>", url.as_str()),
                    Style::default().fg(Color::DarkGray),
                ));
            } else {
                spans.push(Span::styled(label.as_str().to_string(), base));
            }
        } else if let Some(m) = caps.name("bold") {
            spans.push(Span::styled(
                m.as_str().to_string(),
                base.add_modifier(Modifier::BOLD),
            ));
        } else if let Some(m) = caps.name("strike") {
            spans.push(Span::styled(
                m.as_str().to_string(),
                base.add_modifier(Modifier::CROSSED_OUT),
            ));
        } else if let Some(m) = caps.name("italic") {
            spans.push(Span::styled(
                m.as_str().to_string(),
                base.add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(m) = caps.name("url") {
            spans.push(Span::styled(m.as_str().to_string(), link_style()));
        }
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::styled(text[last..].to_string(), base));
    }
    spans
}

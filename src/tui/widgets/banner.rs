// ABOUTME: Error banner widget — one red line per live banner, oldest first.
// ABOUTME: Banners come from the BannerQueue, which drops them once their time is up.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markdown::sanitize;
use crate::tui::banners::BannerQueue;

pub fn banner_lines(banners: &BannerQueue) -> Vec<Line<'static>> {
    banners
        .iter()
        .map(|banner| {
            Line::from(vec![
                Span::styled(
                    " ✖ ",
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", sanitize(&banner.text).replace('\n', " ")),
                    Style::default().fg(Color::Red),
                ),
            ])
        })
        .collect()
}

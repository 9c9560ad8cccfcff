// ABOUTME: Compiled regular expressions for the Markdown renderers.
// ABOUTME: Each accessor compiles its pattern at most once.

use std::sync::OnceLock;

use regex::Regex;

pub(super) fn re_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(```|~~~)\s*([\w+#.-]*)\s*$")
            .expect("re_fence: pattern is valid and should always compile")
    })
}

pub(super) fn re_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(#{1,6})\s+(.*?)(?:\s+#+)?\s*$")
            .expect("re_heading: pattern is valid and should always compile")
    })
}

pub(super) fn re_blockquote() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*>\s?(.*)$")
            .expect("re_blockquote: pattern is valid and should always compile")
    })
}

pub(super) fn re_bullet() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)[-*+]\s+(.*)$")
            .expect("re_bullet: pattern is valid and should always compile")
    })
}

pub(super) fn re_ordered() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)(\d+[.)])\s+(.*)$")
            .expect("re_ordered: pattern is valid and should always compile")
    })
}

pub(super) fn re_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:-[\s-]*-[\s-]*-[\s-]*|\*[\s*]*\*[\s*]*\*[\s*]*|_[\s_]*_[\s_]*_[\s_]*)$")
            .expect("re_rule: pattern is valid and should always compile")
    })
}

/// Inline spans for the full renderer, in priority order: code, link,
/// bold, strikethrough, italic, bare URL.
pub(super) fn re_inline() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"`(?P<code>[^`]+)`",
            r"|\[(?P<link_text>[^\]]+)\]\((?P<link_url>[^)\s]+)\)",
            r"|\*\*(?P<bold>.+?)\*\*",
            r"|~~(?P<strike>.+?)~~",
            r"|\*(?P<italic>[^*\s](?:[^*]*[^*\s])?)\*",
            r#"|(?P<url>https?://[^\s<>()]*[^\s<>().,;:!?'"])"#,
        ))
        .expect("re_inline: pattern is valid and should always compile")
    })
}

/// The minimal fallback: bold, italic and inline code only.
pub(super) fn re_inline_minimal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*\*(?P<bold>.*?)\*\*|\*(?P<italic>.*?)\*|`(?P<code>.*?)`")
            .expect("re_inline_minimal: pattern is valid and should always compile")
    })
}

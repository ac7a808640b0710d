//! Styling markers for page bodies.
//!
//! A body is plain text with `{marker}` tokens. Markers accumulate until
//! `{reset}`, carrying across line breaks. Brace text that is not a known
//! marker is kept verbatim.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

fn apply_marker(style: Style, name: &str) -> Option<Style> {
    let styled = match name {
        "reset" => Style::default(),
        "bright" => style.add_modifier(Modifier::BOLD),
        "dim" => style.add_modifier(Modifier::DIM),
        "cyan" => style.fg(Color::Cyan),
        "green" => style.fg(Color::Green),
        "yellow" => style.fg(Color::Yellow),
        "blue" => style.fg(Color::Blue),
        "magenta" => style.fg(Color::Magenta),
        _ => return None,
    };
    Some(styled)
}

/// Parse a marked-up body into styled lines.
pub fn parse(body: &str) -> Text<'static> {
    let mut style = Style::default();
    let mut lines = Vec::new();

    for raw in body.lines() {
        let mut spans = Vec::new();
        let mut buf = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let marker = after
                .find('}')
                .and_then(|close| apply_marker(style, &after[..close]).map(|s| (close, s)));

            match marker {
                Some((close, next)) => {
                    buf.push_str(&rest[..open]);
                    if !buf.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut buf), style));
                    }
                    style = next;
                    rest = &after[close + 1..];
                }
                None => {
                    buf.push_str(&rest[..=open]);
                    rest = after;
                }
            }
        }
        buf.push_str(rest);
        if !buf.is_empty() {
            spans.push(Span::styled(buf, style));
        }

        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(body: &str) -> String {
        parse(body)
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn plain_text_passes_through() {
        let text = parse("hello\nworld");
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[0].spans[0].content, "hello");
        assert_eq!(text.lines[0].spans[0].style, Style::default());
    }

    #[test]
    fn markers_style_until_reset() {
        let text = parse("{cyan}Time required:{reset} 5-10 minutes");
        let spans = &text.lines[0].spans;
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "Time required:");
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));
        assert_eq!(spans[1].content, " 5-10 minutes");
        assert_eq!(spans[1].style, Style::default());
    }

    #[test]
    fn markers_accumulate() {
        let text = parse("{green}{bright}Live!{reset}");
        let span = &text.lines[0].spans[0];
        assert_eq!(span.style.fg, Some(Color::Green));
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn style_carries_across_lines() {
        let text = parse("{yellow}first\nsecond{reset}\nthird");
        assert_eq!(text.lines[1].spans[0].style.fg, Some(Color::Yellow));
        assert_eq!(text.lines[2].spans[0].style, Style::default());
    }

    #[test]
    fn unknown_braces_are_literal() {
        assert_eq!(plain("  {\n    \"a\": 1\n  }"), "  {\n    \"a\": 1\n  }");
        assert_eq!(plain("{nope} and {bright}x{reset}"), "{nope} and x");
        assert_eq!(plain("open { only"), "open { only");
    }

    #[test]
    fn blank_lines_are_kept() {
        let text = parse("a\n\nb");
        assert_eq!(text.lines.len(), 3);
        assert!(text.lines[1].spans.is_empty());
    }
}

//! Terminal rendering of token streams.
//!
//! Token classes are dotted paths (`string.escape.gql`); the theme matches
//! on the leading segments, so `string.escape` falls back to `string` when
//! no more specific entry exists.

use crate::prism::engine::Token;
use crossterm::style::{Color, Stylize};

/// A class-prefix to color mapping.
pub struct Theme {
    entries: Vec<(&'static str, Color)>,
}

impl Theme {
    /// The default dark-terminal theme.
    pub fn dark() -> Self {
        Self {
            entries: vec![
                ("keyword", Color::Magenta),
                ("type", Color::Cyan),
                ("string", Color::Green),
                ("number", Color::Yellow),
                ("comment", Color::DarkGrey),
                ("metatag", Color::DarkGrey),
                ("variable", Color::Cyan),
                ("constants", Color::Yellow),
                ("annotation", Color::Yellow),
                ("attribute.name", Color::Blue),
                ("attribute.value", Color::Green),
                ("attribute", Color::Blue),
                ("tag", Color::Blue),
                ("delimiter", Color::White),
                ("operator", Color::White),
                ("key", Color::Blue),
                ("argument", Color::Cyan),
                ("invalid", Color::Red),
                ("strong", Color::Yellow),
                ("emphasis", Color::Yellow),
            ],
        }
    }

    /// The color for a token class, by longest matching segment prefix.
    pub fn color_for(&self, class: &str) -> Option<Color> {
        let mut best: Option<(usize, Color)> = None;
        for (prefix, color) in &self.entries {
            if segments_match(class, prefix) {
                let better = best.map(|(len, _)| prefix.len() > len).unwrap_or(true);
                if better {
                    best = Some((prefix.len(), *color));
                }
            }
        }
        best.map(|(_, color)| color)
    }
}

fn segments_match(class: &str, prefix: &str) -> bool {
    match class.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Render one line with ANSI colors. Spans not covered by any token (and
/// tokens with no theme entry) come out unstyled.
pub fn render_line(theme: &Theme, line: &str, tokens: &[Token]) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    let mut cursor = 0usize;

    for token in tokens {
        if token.offset > cursor {
            out.push_str(&line[cursor..token.offset]);
        }
        let text = token.text(line);
        match theme.color_for(&token.class) {
            Some(color) => out.push_str(&text.with(color).to_string()),
            None => out.push_str(text),
        }
        cursor = token.offset + token.length;
    }

    if cursor < line.len() {
        out.push_str(&line[cursor..]);
    }
    out
}

//! Substitution templates
//!
//! Token classes, next-state names, guard right-hand sides, and log messages
//! may all interpolate match data:
//!
//! - `$0` / `$#` - the whole matched text
//! - `$1` .. `$9` - capture groups
//! - `$S0` - the full (dot-separated) name of the current state
//! - `$S1` .. `$S9` - individual dot-segments of the current state name,
//!   which is how pushed states carry bound parameters
//! - `$$` - a literal dollar sign
//!
//! The mini-syntax is lexed with logos and parsed once at compile time;
//! expansion at match time is a straight walk over the pieces.

use logos::Logos;

#[derive(Logos, Debug, PartialEq)]
enum TemplateToken {
    #[token("$$")]
    EscapedDollar,

    #[token("$#")]
    WholeMatch,

    #[regex(r"\$S[0-9]", |lex| lex.slice()[2..].parse::<usize>().ok())]
    StateParam(usize),

    #[regex(r"\$[0-9]", |lex| lex.slice()[1..].parse::<usize>().ok())]
    Capture(usize),

    #[regex(r"[^$]+")]
    Text,

    // A dollar sign not followed by a recognized reference stays literal.
    #[token("$")]
    LoneDollar,
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Text(String),
    /// `$0` or `$#`.
    WholeMatch,
    /// `$n` for n >= 1.
    Capture(usize),
    /// `$Sn`; 0 addresses the full dotted state name.
    StateParam(usize),
}

/// A parsed substitution template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pieces: Vec<Piece>,
}

/// Match data a template expands against.
pub struct SubstitutionContext<'a> {
    /// The whole matched text.
    pub matched: &'a str,
    /// Capture group texts, group 1 first. Unparticipating groups are empty.
    pub captures: &'a [&'a str],
    /// The full dotted name of the current (top-of-stack) state.
    pub state: &'a str,
}

impl Template {
    /// Parse a template. Never fails; unrecognized `$` sequences are kept
    /// as literal text.
    pub fn parse(source: &str) -> Template {
        let mut pieces: Vec<Piece> = Vec::new();
        let mut lexer = TemplateToken::lexer(source);

        let mut push_text = |pieces: &mut Vec<Piece>, text: &str| {
            if let Some(Piece::Text(existing)) = pieces.last_mut() {
                existing.push_str(text);
            } else {
                pieces.push(Piece::Text(text.to_string()));
            }
        };

        while let Some(token) = lexer.next() {
            match token {
                Ok(TemplateToken::EscapedDollar) | Ok(TemplateToken::LoneDollar) => {
                    push_text(&mut pieces, "$")
                }
                Ok(TemplateToken::WholeMatch) => pieces.push(Piece::WholeMatch),
                Ok(TemplateToken::Capture(0)) => pieces.push(Piece::WholeMatch),
                Ok(TemplateToken::Capture(n)) => pieces.push(Piece::Capture(n)),
                Ok(TemplateToken::StateParam(n)) => pieces.push(Piece::StateParam(n)),
                Ok(TemplateToken::Text) | Err(_) => push_text(&mut pieces, lexer.slice()),
            }
        }

        Template { pieces }
    }

    /// True when the template contains no substitutions.
    pub fn is_static(&self) -> bool {
        self.pieces.iter().all(|p| matches!(p, Piece::Text(_)))
    }

    /// The literal text of a static template (`Some("")` when empty).
    pub fn static_text(&self) -> Option<&str> {
        match self.pieces.as_slice() {
            [] => Some(""),
            [Piece::Text(text)] => Some(text),
            _ => None,
        }
    }

    /// Expand the template against match data.
    pub fn expand(&self, ctx: &SubstitutionContext) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::WholeMatch => out.push_str(ctx.matched),
                Piece::Capture(n) => {
                    if let Some(text) = ctx.captures.get(n - 1) {
                        out.push_str(text);
                    }
                }
                Piece::StateParam(0) => out.push_str(ctx.state),
                Piece::StateParam(n) => {
                    if let Some(segment) = ctx.state.split('.').nth(n - 1) {
                        out.push_str(segment);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(matched: &'a str, captures: &'a [&'a str], state: &'a str) -> SubstitutionContext<'a> {
        SubstitutionContext {
            matched,
            captures,
            state,
        }
    }

    #[test]
    fn test_static_template() {
        let t = Template::parse("keyword.control");
        assert!(t.is_static());
        assert_eq!(t.static_text(), Some("keyword.control"));
    }

    #[test]
    fn test_whole_match_substitution() {
        let t = Template::parse("annotation token: $0");
        assert_eq!(
            t.expand(&ctx("@foo", &[], "root")),
            "annotation token: @foo"
        );
    }

    #[test]
    fn test_capture_substitution() {
        let t = Template::parse("string.$1");
        assert_eq!(t.expand(&ctx("'''", &["'''"], "root")), "string.'''");
    }

    #[test]
    fn test_state_param_substitution() {
        let t = Template::parse("$S2");
        assert_eq!(t.expand(&ctx("x", &[], "heredoc.EOF")), "EOF");
        let whole = Template::parse("$S0");
        assert_eq!(whole.expand(&ctx("x", &[], "heredoc.EOF")), "heredoc.EOF");
    }

    #[test]
    fn test_escaped_dollar() {
        let t = Template::parse("cost: $$5");
        assert!(t.is_static());
        assert_eq!(t.static_text(), Some("cost: $5"));
    }
}

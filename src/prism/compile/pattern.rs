//! Pattern expansion and regex construction
//!
//! Rule patterns may reference named grammar attributes with `@name`:
//! string attributes splice in as regex fragments, array attributes splice
//! in as an alternation of their (escaped) members. Expansion is recursive
//! with a depth cap so self-referential fragments fail cleanly instead of
//! spinning.
//!
//! Every expanded pattern compiles to two matchers: one anchored to the
//! start of the remaining input (the normal case) and one unanchored, used
//! only to scan ahead for embedded-language exit rules.

use crate::prism::grammar::definition::{AttributeValue, GrammarDefinition};
use regex::{Regex, RegexBuilder};

const MAX_EXPANSION_DEPTH: usize = 8;

/// Expand `@name` attribute references in a pattern source.
pub fn expand_references(source: &str, grammar: &GrammarDefinition) -> Result<String, String> {
    expand_at_depth(source, grammar, MAX_EXPANSION_DEPTH)
}

fn expand_at_depth(
    source: &str,
    grammar: &GrammarDefinition,
    depth: usize,
) -> Result<String, String> {
    if depth == 0 {
        return Err("attribute references nested too deeply".to_string());
    }

    let mut out = String::with_capacity(source.len());
    let mut chars = source.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c == '\\' {
            // Escapes pass through untouched, including \@.
            out.push(c);
            if let Some((_, escaped)) = chars.next() {
                out.push(escaped);
            }
            continue;
        }
        if c != '@' {
            out.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some((_, nc)) = chars.peek() {
            if nc.is_alphanumeric() || *nc == '_' {
                name.push(*nc);
                chars.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            // A bare @ is an ordinary character.
            out.push('@');
            continue;
        }

        match grammar.attributes.get(&name) {
            Some(AttributeValue::Pattern(fragment)) => {
                let expanded = expand_at_depth(fragment, grammar, depth - 1)?;
                out.push_str("(?:");
                out.push_str(&expanded);
                out.push(')');
            }
            Some(AttributeValue::Set(words)) => {
                let alternation: Vec<String> =
                    words.iter().map(|w| regex::escape(w)).collect();
                out.push_str("(?:");
                out.push_str(&alternation.join("|"));
                out.push(')');
            }
            None => return Err(format!("unknown attribute '@{}'", name)),
        }
    }

    Ok(out)
}

/// Compile an expanded pattern anchored to the start of the input slice.
pub fn build_anchored(expanded: &str, ignore_case: bool) -> Result<Regex, String> {
    RegexBuilder::new(&format!("^(?:{})", expanded))
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| e.to_string())
}

/// Compile an expanded pattern for scan-ahead searching.
pub fn build_search(expanded: &str, ignore_case: bool) -> Result<Regex, String> {
    RegexBuilder::new(&format!("(?:{})", expanded))
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| e.to_string())
}

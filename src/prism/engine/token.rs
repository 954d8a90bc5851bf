//! Token output
//!
//! Tokens are ephemeral: produced per line, consumed immediately by the
//! presentation layer, never stored by the engine. Adjacent spans with the
//! same class are merged on emission, so a run of characters that all
//! classify alike comes out as one token.

use serde::Serialize;

/// One classified span of source text within a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Byte offset within the line.
    pub offset: usize,
    /// Byte length of the span.
    pub length: usize,
    /// Token class, with the grammar's postfix already applied.
    pub class: String,
}

impl Token {
    pub fn new(offset: usize, length: usize, class: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            class: class.into(),
        }
    }

    /// The text this token covers in its line.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.offset..self.offset + self.length]
    }
}

/// Collects tokens for one line, merging contiguous same-class spans.
#[derive(Debug, Default)]
pub(crate) struct TokenSink {
    tokens: Vec<Token>,
}

impl TokenSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, offset: usize, length: usize, class: String) {
        if length == 0 {
            return;
        }
        if let Some(last) = self.tokens.last_mut() {
            if last.class == class && last.offset + last.length == offset {
                last.length += length;
                return;
            }
        }
        self.tokens.push(Token::new(offset, length, class));
    }

    /// Byte offset just past the last emitted token.
    pub fn end(&self) -> usize {
        self.tokens
            .last()
            .map(|t| t.offset + t.length)
            .unwrap_or(0)
    }

    pub fn finish(self) -> Vec<Token> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_same_class_spans_merge() {
        let mut sink = TokenSink::new();
        sink.emit(0, 3, "string".to_string());
        sink.emit(3, 2, "string".to_string());
        sink.emit(5, 1, "delimiter".to_string());
        let tokens = sink.finish();
        assert_eq!(
            tokens,
            vec![
                Token::new(0, 5, "string"),
                Token::new(5, 1, "delimiter"),
            ]
        );
    }

    #[test]
    fn test_non_contiguous_spans_stay_separate() {
        let mut sink = TokenSink::new();
        sink.emit(0, 2, "string".to_string());
        sink.emit(4, 2, "string".to_string());
        assert_eq!(sink.finish().len(), 2);
    }

    #[test]
    fn test_zero_length_emissions_are_dropped() {
        let mut sink = TokenSink::new();
        sink.emit(0, 0, "string".to_string());
        assert!(sink.finish().is_empty());
    }
}

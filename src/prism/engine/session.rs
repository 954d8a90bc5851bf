//! Incremental tokenization sessions.
//!
//! A session owns the current end-of-line state and feeds lines through the
//! executor one at a time. Editors keep one session per document and, after
//! an edit, restart from the snapshot of the last unmodified line instead of
//! re-tokenizing from the top.

use crate::prism::compile::CompiledGrammar;
use crate::prism::engine::executor::Executor;
use crate::prism::engine::stack::LineState;
use crate::prism::engine::token::{Token, TokenSink};
use crate::prism::registry::GrammarRegistry;
use log::warn;
use std::sync::Arc;

/// The result of tokenizing one line: the tokens plus the state snapshot a
/// following line would start from.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTokens {
    pub tokens: Vec<Token>,
    pub end_state: LineState,
}

/// A stateful tokenizer over one document.
pub struct Session {
    grammar: Arc<CompiledGrammar>,
    registry: Arc<GrammarRegistry>,
    state: LineState,
}

impl Session {
    pub fn open(grammar: Arc<CompiledGrammar>, registry: Arc<GrammarRegistry>) -> Self {
        Self {
            grammar,
            registry,
            state: LineState::new(),
        }
    }

    /// The language identifier this session tokenizes.
    pub fn language(&self) -> &str {
        &self.grammar.name
    }

    /// The state the next line would be tokenized from. Equal snapshots
    /// guarantee identical tokenization of identical subsequent input, which
    /// is what lets an editor stop re-tokenizing early after an edit.
    pub fn line_state(&self) -> &LineState {
        &self.state
    }

    /// Resume from an earlier snapshot, discarding the current state.
    pub fn restart_from(&mut self, snapshot: LineState) {
        self.state = snapshot;
    }

    /// Back to a fresh `[root]` stack.
    pub fn reset(&mut self) {
        self.state = LineState::new();
    }

    /// Tokenize the next line of the document and advance the session state.
    ///
    /// `line` must not contain a newline. Runtime failures are contained
    /// here: the tokens produced before the failure are kept, the remainder
    /// of the line becomes one `invalid` token, and the state resets to
    /// `[root]` so following lines recover.
    pub fn tokenize_line(&mut self, line: &str) -> LineTokens {
        let snapshot = self.state.clone();
        let result = self.tokenize_line_from(&snapshot, line);
        self.state = result.end_state.clone();
        result
    }

    /// Tokenize `line` starting from `snapshot` without touching the
    /// session's own state.
    pub fn tokenize_line_from(&self, snapshot: &LineState, line: &str) -> LineTokens {
        let mut state = snapshot.clone();
        let mut sink = TokenSink::new();
        let executor = Executor::new(&self.grammar, &self.registry);

        match executor.tokenize_line(&mut state, line, &mut sink) {
            Ok(()) => LineTokens {
                tokens: sink.finish(),
                end_state: state,
            },
            Err(err) => {
                warn!("tokenization of a '{}' line failed: {}", self.grammar.name, err);
                let covered = sink.end();
                let mut tokens = sink.finish();
                if covered < line.len() {
                    tokens.push(Token {
                        offset: covered,
                        length: line.len() - covered,
                        class: self.grammar.postfixed("invalid"),
                    });
                }
                LineTokens {
                    tokens,
                    end_state: LineState::new(),
                }
            }
        }
    }

    /// Tokenize a whole document, line by line, continuing from the current
    /// session state. Handles both LF and CRLF line endings.
    pub fn tokenize_all(&mut self, source: &str) -> Vec<LineTokens> {
        source
            .split('\n')
            .map(|line| self.tokenize_line(line.strip_suffix('\r').unwrap_or(line)))
            .collect()
    }
}

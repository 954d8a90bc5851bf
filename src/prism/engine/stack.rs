//! The state stack and line-state snapshots
//!
//! A frame is the full (possibly dot-parameterized) name of a tokenizer
//! state, e.g. `stringBody` or `heredoc.EOF`. The bottom frame is always
//! `root`; popping it is a no-op rather than an error, because malformed
//! partial documents are the common case while editing.
//!
//! `LineState` is the complete restartable snapshot taken at each end of
//! line: the host stack plus, when an embedded language is active, the
//! nested language's own snapshot.

use crate::prism::grammar::definition::ROOT_STATE;

/// The session's current nested-state context. Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStack {
    frames: Vec<String>,
}

impl StateStack {
    pub fn new() -> Self {
        Self {
            frames: vec![ROOT_STATE.to_string()],
        }
    }

    /// The full name of the current state.
    pub fn top(&self) -> &str {
        // Invariant: never empty.
        self.frames.last().map(|s| s.as_str()).unwrap_or(ROOT_STATE)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, state: String) {
        self.frames.push(state);
    }

    /// Pop the top frame. Returns false (and leaves the stack untouched)
    /// when only the bottom `root` frame remains.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Truncate back to `[root]`.
    pub fn popall(&mut self) {
        self.frames.truncate(1);
    }

    /// Replace the top frame without changing the depth.
    pub fn switch_to(&mut self, state: String) {
        if let Some(top) = self.frames.last_mut() {
            *top = state;
        }
    }
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new()
    }
}

/// A restartable end-of-line snapshot: host stack plus any active embedded
/// language context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineState {
    pub(crate) stack: StateStack,
    pub(crate) embedded: Option<Box<EmbeddedState>>,
}

/// The nested context while an embedded language is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmbeddedState {
    pub language: String,
    pub state: LineState,
}

impl LineState {
    pub fn new() -> Self {
        Self {
            stack: StateStack::new(),
            embedded: None,
        }
    }

    /// The full name of the current host state.
    pub fn current_state(&self) -> &str {
        self.stack.top()
    }

    /// True when an embedded language is active.
    pub fn in_embedded(&self) -> bool {
        self.embedded.is_some()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }
}

impl Default for LineState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_root() {
        let stack = StateStack::new();
        assert_eq!(stack.top(), "root");
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_push_then_pop_restores_prior_stack() {
        let mut stack = StateStack::new();
        stack.push("string".to_string());
        let before = stack.clone();
        stack.push("escape".to_string());
        assert!(stack.pop());
        assert_eq!(stack, before);
    }

    #[test]
    fn test_pop_on_root_is_a_noop() {
        let mut stack = StateStack::new();
        assert!(!stack.pop());
        assert_eq!(stack.top(), "root");
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_popall_truncates_to_root() {
        let mut stack = StateStack::new();
        stack.push("a".to_string());
        stack.push("b".to_string());
        stack.popall();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), "root");
    }

    #[test]
    fn test_switch_to_replaces_top() {
        let mut stack = StateStack::new();
        stack.push("script".to_string());
        stack.switch_to("style".to_string());
        assert_eq!(stack.top(), "style");
        assert_eq!(stack.depth(), 2);
    }
}

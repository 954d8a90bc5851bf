//! The state machine executor
//!
//! Given the current input position, the state stack, and a compiled
//! grammar, the executor selects the first matching rule of the
//! top-of-stack state (ordered alternation, not longest match), applies its
//! action, and advances the cursor. Matches never span the end of the line;
//! tokenization is strictly line-at-a-time for incremental re-highlighting.
//!
//! Forward progress is enforced: a zero-length match that changes nothing
//! consumes one character as the default token, and a chain of
//! non-consuming state changes is capped before it can spin.

use crate::prism::compile::compiler::{
    CompiledAction, CompiledGrammar, CompiledRule, EmbeddedTransition, TokenClass, TokenSpec,
    Transition,
};
use crate::prism::compile::template::SubstitutionContext;
use crate::prism::engine::cases::{self, MatchContext};
use crate::prism::engine::stack::{EmbeddedState, LineState};
use crate::prism::engine::token::TokenSink;
use crate::prism::registry::GrammarRegistry;
use log::{debug, trace, warn};
use std::fmt;

/// Consecutive non-consuming steps tolerated before giving up on a line.
const MAX_STALL_STEPS: usize = 100;

/// State changes applied by empty-match rules at end of line.
const MAX_EOL_TRANSITIONS: usize = 20;

/// Runtime tokenization errors. These are contained per line by the
/// session: the offending line falls back to a single `invalid` token and
/// the stack resets to `[root]`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenizeError {
    /// A case table had no satisfied guard and no `@default`.
    NoMatchingCase { state: String, matched: String },
    /// A parameterized push resolved to a state the grammar does not define.
    UnknownState { state: String },
    /// The rule set kept changing state without consuming input.
    NoProgress { state: String, offset: usize },
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::NoMatchingCase { state, matched } => write!(
                f,
                "No case matched '{}' in state '{}' and the table has no @default",
                matched, state
            ),
            TokenizeError::UnknownState { state } => {
                write!(f, "Transition into unknown state '{}'", state)
            }
            TokenizeError::NoProgress { state, offset } => write!(
                f,
                "No forward progress in state '{}' at offset {}",
                state, offset
            ),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Executes one compiled grammar over line slices.
pub struct Executor<'a> {
    grammar: &'a CompiledGrammar,
    registry: &'a GrammarRegistry,
}

impl<'a> Executor<'a> {
    pub fn new(grammar: &'a CompiledGrammar, registry: &'a GrammarRegistry) -> Self {
        Self { grammar, registry }
    }

    /// Tokenize one line (without its trailing newline), mutating `state`
    /// into the end-of-line snapshot and emitting tokens into `sink`.
    pub fn tokenize_line(
        &self,
        state: &mut LineState,
        line: &str,
        sink: &mut TokenSink,
    ) -> Result<(), TokenizeError> {
        self.run(state, line, 0, sink)
    }

    fn run(
        &self,
        state: &mut LineState,
        text: &str,
        base: usize,
        sink: &mut TokenSink,
    ) -> Result<(), TokenizeError> {
        let mut pos = 0usize;
        let mut stall = 0usize;

        while pos < text.len() {
            let before = pos;
            pos = if state.embedded.is_some() {
                self.run_embedded(state, text, pos, base, sink)?
            } else {
                self.step(state, text, pos, base, sink)?
            };

            if pos == before {
                stall += 1;
                if stall > MAX_STALL_STEPS {
                    return Err(TokenizeError::NoProgress {
                        state: state.stack.top().to_string(),
                        offset: base + pos,
                    });
                }
            } else {
                stall = 0;
            }
        }

        // Rules matching the empty string at end of line (`$` anchors) may
        // still change state, which determines where the next line starts.
        if state.embedded.is_none() {
            self.apply_eol_transitions(state, text, base, sink)?;
        }

        Ok(())
    }

    fn rules_for(&self, state: &LineState) -> Result<&'a [CompiledRule], TokenizeError> {
        self.grammar
            .state(state.stack.top())
            .ok_or_else(|| TokenizeError::UnknownState {
                state: state.stack.top().to_string(),
            })
    }

    /// One normal step: try the current state's rules in order at `pos`.
    fn step(
        &self,
        state: &mut LineState,
        text: &str,
        pos: usize,
        base: usize,
        sink: &mut TokenSink,
    ) -> Result<usize, TokenizeError> {
        let slice = &text[pos..];
        let rules = self.rules_for(state)?;

        for rule in rules {
            if let Some(caps) = rule.pattern.captures(slice) {
                return self.apply_rule(rule, &caps, state, text, pos, base, sink);
            }
        }

        // No rule matched: consume one character as the default token.
        let ch_len = slice.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
        sink.emit(
            base + pos,
            ch_len,
            self.grammar.postfixed(&self.grammar.default_token),
        );
        Ok(pos + ch_len)
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_rule(
        &self,
        rule: &CompiledRule,
        caps: &regex::Captures,
        state: &mut LineState,
        text: &str,
        pos: usize,
        base: usize,
        sink: &mut TokenSink,
    ) -> Result<usize, TokenizeError> {
        let matched = caps.get(0).map(|m| m.as_str()).unwrap_or("");
        let match_len = matched.len();
        let capture_texts: Vec<&str> = (1..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str()).unwrap_or(""))
            .collect();
        let eos = pos + match_len == text.len();

        // Snapshot only when progress depends on a state change.
        let before = if match_len == 0 {
            Some(state.clone())
        } else {
            None
        };

        let mut rematch = false;
        match &rule.action {
            CompiledAction::Emit(spec) => {
                self.apply_spec(
                    spec,
                    matched,
                    &capture_texts,
                    base + pos,
                    match_len,
                    state,
                    sink,
                    &mut rematch,
                )?;
            }
            CompiledAction::EmitGroups(specs) => {
                for (idx, spec) in specs.iter().enumerate() {
                    let (offset, length) = match caps.get(idx + 1) {
                        Some(m) => (base + pos + m.start(), m.len()),
                        None => (base + pos, 0),
                    };
                    let group_text = caps.get(idx + 1).map(|m| m.as_str()).unwrap_or("");
                    self.apply_spec(
                        spec,
                        group_text,
                        &capture_texts,
                        offset,
                        length,
                        state,
                        sink,
                        &mut rematch,
                    )?;
                }
            }
            CompiledAction::Cases(branches) => {
                let ctx = MatchContext {
                    matched,
                    captures: &capture_texts,
                    state: state.stack.top(),
                    eos,
                };
                let spec = cases::resolve(self.grammar, branches, &ctx)?.clone();
                self.apply_spec(
                    &spec,
                    matched,
                    &capture_texts,
                    base + pos,
                    match_len,
                    state,
                    sink,
                    &mut rematch,
                )?;
            }
        }

        if rematch {
            return Ok(pos);
        }

        if match_len == 0 {
            let unchanged = before.map(|b| b == *state).unwrap_or(false);
            if unchanged {
                // Forward progress: a zero-length match that changed nothing
                // costs one character of default token.
                match text[pos..].chars().next() {
                    Some(c) => {
                        sink.emit(
                            base + pos,
                            c.len_utf8(),
                            self.grammar.postfixed(&self.grammar.default_token),
                        );
                        return Ok(pos + c.len_utf8());
                    }
                    None => return Ok(pos),
                }
            }
            return Ok(pos);
        }

        Ok(pos + match_len)
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_spec(
        &self,
        spec: &TokenSpec,
        matched: &str,
        captures: &[&str],
        offset: usize,
        length: usize,
        state: &mut LineState,
        sink: &mut TokenSink,
        rematch: &mut bool,
    ) -> Result<(), TokenizeError> {
        let current_state = state.stack.top().to_string();
        let sub = SubstitutionContext {
            matched,
            captures,
            state: &current_state,
        };

        if let Some(message) = &spec.log {
            debug!(target: "prism::grammar", "{}", message.expand(&sub));
        }

        match &spec.class {
            TokenClass::Rematch => *rematch = true,
            TokenClass::Brackets => {
                let class = match self.grammar.bracket_for(matched) {
                    Some((bracket, _)) => self.grammar.postfixed(&bracket.token),
                    None => self.grammar.postfixed(&self.grammar.default_token),
                };
                sink.emit(offset, length, class);
            }
            TokenClass::Class(template) => {
                let class = self.grammar.postfixed(&template.expand(&sub));
                sink.emit(offset, length, class);
            }
        }

        match &spec.embedded {
            Some(EmbeddedTransition::Enter(language)) => {
                let language = language.expand(&sub);
                trace!("entering embedded language '{}'", language);
                state.embedded = Some(Box::new(EmbeddedState {
                    language,
                    state: LineState::new(),
                }));
            }
            Some(EmbeddedTransition::Exit) => {
                trace!("leaving embedded language");
                state.embedded = None;
            }
            None => {}
        }

        match &spec.transition {
            Some(Transition::Push(target)) => {
                let name = target.expand(&sub);
                if self.grammar.state(&name).is_none() {
                    return Err(TokenizeError::UnknownState { state: name });
                }
                state.stack.push(name);
            }
            Some(Transition::PushCurrent) => {
                state.stack.push(current_state);
            }
            Some(Transition::Pop) => {
                if !state.stack.pop() {
                    trace!("pop on the root frame ignored");
                }
            }
            Some(Transition::PopAll) => state.stack.popall(),
            Some(Transition::SwitchTo(target)) => {
                let name = target.expand(&sub);
                if self.grammar.state(&name).is_none() {
                    return Err(TokenizeError::UnknownState { state: name });
                }
                state.stack.switch_to(name);
            }
            None => {}
        }

        Ok(())
    }

    /// While an embedded language is active, scan the remaining line for the
    /// earliest exit-rule match of the current host state; everything before
    /// it belongs to the embedded language.
    fn run_embedded(
        &self,
        state: &mut LineState,
        text: &str,
        pos: usize,
        base: usize,
        sink: &mut TokenSink,
    ) -> Result<usize, TokenizeError> {
        let slice = &text[pos..];
        let rules = self.rules_for(state)?;

        let mut exit: Option<(usize, &CompiledRule)> = None;
        for rule in rules {
            if let Some(search) = &rule.exit_search {
                if let Some(m) = search.find(slice) {
                    let closer = exit.map(|(start, _)| m.start() < start).unwrap_or(true);
                    if closer {
                        exit = Some((m.start(), rule));
                    }
                }
            }
        }

        let interior_end = exit
            .as_ref()
            .map(|(start, _)| pos + start)
            .unwrap_or(text.len());
        if interior_end > pos {
            self.tokenize_interior(state, text, pos, interior_end, base, sink)?;
        }

        match exit {
            // No exit on this line: the embedded region continues.
            None => Ok(text.len()),
            Some((_, rule)) => match rule.pattern.captures(&text[interior_end..]) {
                Some(caps) => self.apply_rule(rule, &caps, state, text, interior_end, base, sink),
                None => {
                    self.tokenize_interior(state, text, interior_end, text.len(), base, sink)?;
                    Ok(text.len())
                }
            },
        }
    }

    fn tokenize_interior(
        &self,
        state: &mut LineState,
        text: &str,
        start: usize,
        end: usize,
        base: usize,
        sink: &mut TokenSink,
    ) -> Result<(), TokenizeError> {
        let Some(mut embedded) = state.embedded.take() else {
            return Ok(());
        };

        let segment = &text[start..end];
        let result = match self.registry.grammar(&embedded.language) {
            Ok(grammar) => {
                let nested = Executor::new(&grammar, self.registry);
                nested.run(&mut embedded.state, segment, base + start, sink)
            }
            Err(err) => {
                // Unknown embedded languages degrade to unstyled text.
                warn!(
                    "embedded language '{}' unavailable: {}",
                    embedded.language, err
                );
                sink.emit(base + start, end - start, String::new());
                Ok(())
            }
        };

        state.embedded = Some(embedded);
        result
    }

    /// Apply state changes from rules that match the empty string at end of
    /// line (`$`-anchored rules). Bounded so mutually-pushing states cannot
    /// spin.
    fn apply_eol_transitions(
        &self,
        state: &mut LineState,
        text: &str,
        base: usize,
        sink: &mut TokenSink,
    ) -> Result<(), TokenizeError> {
        for _ in 0..MAX_EOL_TRANSITIONS {
            let rules = self.rules_for(state)?;
            let end = text.len();
            let matched = rules
                .iter()
                .find_map(|rule| rule.pattern.captures(&text[end..]).map(|caps| (rule, caps)));

            let Some((rule, caps)) = matched else {
                return Ok(());
            };

            let before = state.clone();
            self.apply_rule(rule, &caps, state, text, end, base, sink)?;
            if *state == before {
                return Ok(());
            }
        }
        Ok(())
    }
}

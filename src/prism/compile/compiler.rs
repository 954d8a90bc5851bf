//! The rule compiler
//!
//! Turns a `GrammarDefinition` into an immutable `CompiledGrammar`:
//!
//! - verifies the `root` state exists
//! - inlines `include` directives (rejecting cycles)
//! - interns symbol-set attributes into hash sets
//! - expands `@name` pattern references and compiles every pattern
//! - lowers actions into a small executable form (token templates, parsed
//!   guards, resolved transitions)
//!
//! Compiled grammars are immutable and freely shareable across sessions.

use crate::prism::compile::error::CompileError;
use crate::prism::compile::pattern;
use crate::prism::compile::template::Template;
use crate::prism::grammar::definition::{
    ActionDefinition, BracketDefinition, CaseBranches, DetailedAction, GrammarDefinition,
    RuleDefinition, ROOT_STATE,
};
use log::debug;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// A bracket pair with its token class.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBracket {
    pub open: String,
    pub close: String,
    pub token: String,
}

/// Which side of a bracket pair a piece of text matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketSide {
    Open,
    Close,
}

/// The token class part of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenClass {
    /// An ordinary (possibly substituting) class template.
    Class(Template),
    /// `@rematch`: apply the state change, emit nothing, and re-scan the
    /// same input in the new state.
    Rematch,
    /// `@brackets`: look the matched text up in the bracket table.
    Brackets,
}

/// A state-stack transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Push a (possibly parameterized) state.
    Push(Template),
    /// `@push`: push the current state again.
    PushCurrent,
    /// `@pop`. Popping the bottom frame is a runtime no-op.
    Pop,
    /// `@popall`: truncate back to `[root]`.
    PopAll,
    /// Replace the top frame without pushing.
    SwitchTo(Template),
}

/// Entering or leaving an embedded language.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedTransition {
    Enter(Template),
    Exit,
}

/// A fully lowered action outcome: what to emit and how to move.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpec {
    pub class: TokenClass,
    pub transition: Option<Transition>,
    pub embedded: Option<EmbeddedTransition>,
    pub log: Option<Template>,
}

/// What a case guard scrutinizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// `$#` (the default): the whole matched text.
    WholeMatch,
    /// `$n`: capture group n (0 is the whole match).
    Capture(usize),
    /// `$Sn`: dot-segment n of the current state name (0 is the full name).
    StateParam(usize),
}

/// The right-hand side of a `~` / `!~` guard.
#[derive(Debug, Clone)]
pub enum PatternRhs {
    /// Precompiled: the guard pattern had no substitutions.
    Static(Regex),
    /// Compiled per evaluation after substitution.
    Dynamic(Template),
}

impl PartialEq for PatternRhs {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Static(a), Self::Static(b)) => a.as_str() == b.as_str(),
            (Self::Dynamic(a), Self::Dynamic(b)) => a == b,
            _ => false,
        }
    }
}

/// The comparison a guard performs on its operand.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardTest {
    Eq(Template),
    Ne(Template),
    /// Membership in a named symbol set.
    In(String),
    NotIn(String),
    Matches(PatternRhs),
    NotMatches(PatternRhs),
}

/// One parsed case guard.
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    /// `@default`: always satisfied; must be the last branch.
    Default,
    /// `@eos`: the match ends exactly at the end of the line.
    Eos,
    Expr { operand: Operand, test: GuardTest },
}

/// One branch of a compiled case table.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub guard: Guard,
    pub outcome: TokenSpec,
}

/// A compiled action.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledAction {
    Emit(TokenSpec),
    /// One spec per capture group; only the last may carry a transition.
    EmitGroups(Vec<TokenSpec>),
    Cases(Vec<CaseBranch>),
}

/// A compiled rule: pattern plus action.
#[derive(Debug)]
pub struct CompiledRule {
    /// Anchored to the start of the remaining input.
    pub pattern: Regex,
    pub action: CompiledAction,
    /// Unanchored variant, present only on embedded-exit rules; used to
    /// scan ahead for where an embedded region ends.
    pub exit_search: Option<Regex>,
}

impl PartialEq for CompiledRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str()
            && self.action == other.action
            && self.exit_search.as_ref().map(Regex::as_str)
                == other.exit_search.as_ref().map(Regex::as_str)
    }
}

/// An immutable compiled grammar, shareable across sessions.
#[derive(Debug, PartialEq)]
pub struct CompiledGrammar {
    pub name: String,
    pub default_token: String,
    pub token_postfix: String,
    pub ignore_case: bool,
    brackets: Vec<CompiledBracket>,
    states: HashMap<String, Vec<CompiledRule>>,
    sets: HashMap<String, HashSet<String>>,
}

impl CompiledGrammar {
    /// Rules of a state, resolving parameterized names by their prefix:
    /// `string.'''` falls back to `string`.
    pub fn state(&self, name: &str) -> Option<&[CompiledRule]> {
        let mut candidate = name;
        loop {
            if let Some(rules) = self.states.get(candidate) {
                return Some(rules.as_slice());
            }
            match candidate.rfind('.') {
                Some(idx) => candidate = &candidate[..idx],
                None => return None,
            }
        }
    }

    /// Names of the defined states.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(|s| s.as_str())
    }

    /// Names of the interned symbol sets.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(|s| s.as_str())
    }

    /// Membership test against an interned symbol set.
    pub fn set_contains(&self, set: &str, word: &str) -> bool {
        let Some(entries) = self.sets.get(set) else {
            return false;
        };
        if self.ignore_case {
            entries.contains(&word.to_lowercase())
        } else {
            entries.contains(word)
        }
    }

    /// True when the grammar defines the named symbol set.
    pub fn has_set(&self, set: &str) -> bool {
        self.sets.contains_key(set)
    }

    /// Bracket table entry for a piece of matched text.
    pub fn bracket_for(&self, text: &str) -> Option<(&CompiledBracket, BracketSide)> {
        for bracket in &self.brackets {
            if bracket.open == text {
                return Some((bracket, BracketSide::Open));
            }
            if bracket.close == text {
                return Some((bracket, BracketSide::Close));
            }
        }
        None
    }

    /// Apply the grammar's token postfix. Empty classes stay empty.
    pub fn postfixed(&self, class: &str) -> String {
        if class.is_empty() || self.token_postfix.is_empty() {
            class.to_string()
        } else {
            format!("{}{}", class, self.token_postfix)
        }
    }
}

/// Compile a grammar definition.
pub fn compile(name: &str, def: &GrammarDefinition) -> Result<CompiledGrammar, CompileError> {
    if !def.tokenizer.contains_key(ROOT_STATE) {
        return Err(CompileError::MissingRootState);
    }

    let compiler = Compiler { def };

    let mut sets = HashMap::new();
    for (attr_name, _) in def.attributes.iter() {
        if let Some(words) = def.symbol_set(attr_name) {
            let interned: HashSet<String> = if def.ignore_case {
                words.iter().map(|w| w.to_lowercase()).collect()
            } else {
                words.iter().cloned().collect()
            };
            sets.insert(attr_name.clone(), interned);
        }
    }

    let brackets = def
        .brackets
        .clone()
        .unwrap_or_else(BracketDefinition::standard)
        .into_iter()
        .map(|b| CompiledBracket {
            open: b.open,
            close: b.close,
            token: b.token,
        })
        .collect();

    let mut states = HashMap::new();
    for state_name in def.tokenizer.keys() {
        let mut visiting = Vec::new();
        let flattened = compiler.flatten_state(state_name, &mut visiting)?;
        let mut rules = Vec::with_capacity(flattened.len());
        for (pattern_src, action) in flattened {
            rules.push(compiler.compile_rule(state_name, pattern_src, action)?);
        }
        states.insert(state_name.clone(), rules);
    }

    debug!(
        "compiled grammar '{}': {} states, {} symbol sets",
        name,
        states.len(),
        sets.len()
    );

    Ok(CompiledGrammar {
        name: name.to_string(),
        default_token: def.default_token.clone(),
        token_postfix: def.token_postfix.clone().unwrap_or_default(),
        ignore_case: def.ignore_case,
        brackets,
        states,
        sets,
    })
}

struct Compiler<'d> {
    def: &'d GrammarDefinition,
}

impl<'d> Compiler<'d> {
    /// Inline `include` directives, depth-first, rejecting cycles.
    fn flatten_state<'s>(
        &'s self,
        state: &str,
        visiting: &mut Vec<String>,
    ) -> Result<Vec<(&'s str, &'s ActionDefinition)>, CompileError> {
        if visiting.iter().any(|s| s == state) {
            let mut cycle = visiting.join(" -> ");
            cycle.push_str(" -> ");
            cycle.push_str(state);
            return Err(CompileError::CyclicInclude {
                state: visiting[0].clone(),
                cycle,
            });
        }

        let rules = self.def.tokenizer.get(state).ok_or_else(|| {
            let from = visiting.last().cloned().unwrap_or_else(|| state.to_string());
            CompileError::UnknownStateReference {
                state: from,
                reference: state.to_string(),
            }
        })?;

        visiting.push(state.to_string());
        let mut flattened = Vec::new();
        for rule in rules {
            match rule {
                RuleDefinition::Include(target) => {
                    let target = target.strip_prefix('@').unwrap_or(target);
                    flattened.extend(self.flatten_state(target, visiting)?);
                }
                RuleDefinition::Rule { pattern, action } => {
                    flattened.push((pattern.as_str(), action));
                }
            }
        }
        visiting.pop();

        Ok(flattened)
    }

    fn compile_rule(
        &self,
        state: &str,
        pattern_src: &str,
        action: &ActionDefinition,
    ) -> Result<CompiledRule, CompileError> {
        let expanded = pattern::expand_references(pattern_src, self.def).map_err(|message| {
            CompileError::InvalidPattern {
                state: state.to_string(),
                pattern: pattern_src.to_string(),
                message,
            }
        })?;

        let regex = pattern::build_anchored(&expanded, self.def.ignore_case).map_err(|message| {
            CompileError::InvalidPattern {
                state: state.to_string(),
                pattern: pattern_src.to_string(),
                message,
            }
        })?;

        let capture_count = regex.captures_len() - 1;
        let action = self.lower_action(state, action, capture_count)?;

        // Embedded-exit rules additionally get an unanchored matcher so the
        // executor can find where an embedded region ends.
        let exits_embedded = matches!(
            &action,
            CompiledAction::Emit(spec) if matches!(spec.embedded, Some(EmbeddedTransition::Exit))
        );
        let exit_search = if exits_embedded {
            Some(
                pattern::build_search(&expanded, self.def.ignore_case).map_err(|message| {
                    CompileError::InvalidPattern {
                        state: state.to_string(),
                        pattern: pattern_src.to_string(),
                        message,
                    }
                })?,
            )
        } else {
            None
        };

        Ok(CompiledRule {
            pattern: regex,
            action,
            exit_search,
        })
    }

    fn lower_action(
        &self,
        state: &str,
        action: &ActionDefinition,
        capture_count: usize,
    ) -> Result<CompiledAction, CompileError> {
        match action {
            ActionDefinition::Token(class) => {
                Ok(CompiledAction::Emit(self.lower_token_only(class)))
            }
            ActionDefinition::Group(parts) => {
                if parts.len() != capture_count {
                    return Err(CompileError::MalformedRule {
                        state: state.to_string(),
                        message: format!(
                            "group action has {} entries but the pattern has {} capture groups",
                            parts.len(),
                            capture_count
                        ),
                    });
                }
                let mut specs = Vec::with_capacity(parts.len());
                for (idx, part) in parts.iter().enumerate() {
                    let spec = match part {
                        ActionDefinition::Token(class) => self.lower_token_only(class),
                        ActionDefinition::Detailed(detailed) => {
                            self.lower_detailed(state, detailed)?
                        }
                        ActionDefinition::Group(_) => {
                            return Err(CompileError::MalformedRule {
                                state: state.to_string(),
                                message: "group actions cannot nest".to_string(),
                            })
                        }
                    };
                    let last = idx + 1 == parts.len();
                    if !last && (spec.transition.is_some() || spec.embedded.is_some()) {
                        return Err(CompileError::MalformedRule {
                            state: state.to_string(),
                            message: "only the last group entry may change state".to_string(),
                        });
                    }
                    specs.push(spec);
                }
                Ok(CompiledAction::EmitGroups(specs))
            }
            ActionDefinition::Detailed(detailed) => match &detailed.cases {
                Some(branches) => self.lower_cases(state, detailed, branches),
                None => Ok(CompiledAction::Emit(self.lower_detailed(state, detailed)?)),
            },
        }
    }

    fn lower_cases(
        &self,
        state: &str,
        detailed: &DetailedAction,
        branches: &CaseBranches,
    ) -> Result<CompiledAction, CompileError> {
        if detailed.token.is_some() || detailed.next.is_some() || detailed.switch_to.is_some() {
            return Err(CompileError::MalformedRule {
                state: state.to_string(),
                message: "an action with cases cannot also carry token or next".to_string(),
            });
        }

        let mut compiled = Vec::with_capacity(branches.0.len());
        for (idx, (raw_guard, outcome)) in branches.0.iter().enumerate() {
            let guard = self.parse_guard(state, raw_guard)?;
            if matches!(guard, Guard::Default) && idx + 1 != branches.0.len() {
                return Err(CompileError::MalformedRule {
                    state: state.to_string(),
                    message: "@default must be the last case branch".to_string(),
                });
            }
            let outcome = match outcome {
                ActionDefinition::Token(class) => self.lower_token_only(class),
                ActionDefinition::Detailed(inner) => {
                    if inner.cases.is_some() {
                        return Err(CompileError::MalformedRule {
                            state: state.to_string(),
                            message: "case branches cannot nest further cases".to_string(),
                        });
                    }
                    self.lower_detailed(state, inner)?
                }
                ActionDefinition::Group(_) => {
                    return Err(CompileError::MalformedRule {
                        state: state.to_string(),
                        message: "case branches cannot carry group actions".to_string(),
                    })
                }
            };
            compiled.push(CaseBranch { guard, outcome });
        }

        Ok(CompiledAction::Cases(compiled))
    }

    fn lower_token_only(&self, class: &str) -> TokenSpec {
        TokenSpec {
            class: parse_token_class(class),
            transition: None,
            embedded: None,
            log: None,
        }
    }

    fn lower_detailed(
        &self,
        state: &str,
        detailed: &DetailedAction,
    ) -> Result<TokenSpec, CompileError> {
        if detailed.next.is_some() && detailed.switch_to.is_some() {
            return Err(CompileError::MalformedRule {
                state: state.to_string(),
                message: "an action cannot carry both next and switchTo".to_string(),
            });
        }

        let transition = match (&detailed.next, &detailed.switch_to) {
            (Some(next), None) => Some(self.parse_transition(state, next, false)?),
            (None, Some(target)) => Some(self.parse_transition(state, target, true)?),
            (None, None) => None,
            (Some(_), Some(_)) => unreachable!(),
        };

        let embedded = match detailed.next_embedded.as_deref() {
            None => None,
            Some("@pop") => Some(EmbeddedTransition::Exit),
            Some(language) => Some(EmbeddedTransition::Enter(Template::parse(language))),
        };

        if let Some(bracket) = detailed.bracket.as_deref() {
            if bracket != "@open" && bracket != "@close" {
                return Err(CompileError::MalformedRule {
                    state: state.to_string(),
                    message: format!("bracket must be @open or @close, got '{}'", bracket),
                });
            }
        }

        Ok(TokenSpec {
            class: parse_token_class(detailed.token.as_deref().unwrap_or("")),
            transition,
            embedded,
            log: detailed.log.as_deref().map(Template::parse),
        })
    }

    fn parse_transition(
        &self,
        state: &str,
        target: &str,
        switch: bool,
    ) -> Result<Transition, CompileError> {
        match target {
            "@pop" => return Ok(Transition::Pop),
            "@popall" => return Ok(Transition::PopAll),
            "@push" => return Ok(Transition::PushCurrent),
            _ => {}
        }

        let name = target.strip_prefix('@').unwrap_or(target);
        let template = Template::parse(name);

        // Static targets are checked now; parameterized ones at runtime.
        if let Some(static_name) = template.static_text() {
            let base = static_name.split('.').next().unwrap_or(static_name);
            if !self.def.tokenizer.contains_key(base) {
                return Err(CompileError::UnknownStateReference {
                    state: state.to_string(),
                    reference: static_name.to_string(),
                });
            }
        }

        Ok(if switch {
            Transition::SwitchTo(template)
        } else {
            Transition::Push(template)
        })
    }

    /// Parse a case guard key.
    ///
    /// Grammar: `[$operand][op]pattern` where the operand defaults to `$#`
    /// (the matched text), and the operator defaults to `~` for non-word
    /// patterns and `==` for plain words.
    fn parse_guard(&self, state: &str, raw: &str) -> Result<Guard, CompileError> {
        match raw {
            "@default" => return Ok(Guard::Default),
            "@eos" => return Ok(Guard::Eos),
            _ => {}
        }

        let (operand, rest) = parse_operand(raw);

        let (op, pat) = if rest.is_empty() {
            ("!=", "")
        } else if rest.chars().all(|c| c.is_alphanumeric() || c == '_') {
            ("==", rest)
        } else if let Some(p) = rest.strip_prefix("!@") {
            ("!@", p)
        } else if let Some(p) = rest.strip_prefix('@') {
            ("@", p)
        } else if let Some(p) = rest.strip_prefix("==") {
            ("==", p)
        } else if let Some(p) = rest.strip_prefix("!=") {
            ("!=", p)
        } else if let Some(p) = rest.strip_prefix("!~") {
            ("!~", p)
        } else if let Some(p) = rest.strip_prefix('~') {
            ("~", p)
        } else {
            ("~", rest)
        };

        let test = match op {
            "==" => GuardTest::Eq(Template::parse(pat)),
            "!=" => GuardTest::Ne(Template::parse(pat)),
            "@" | "!@" => {
                if self.def.symbol_set(pat).is_none() {
                    return Err(CompileError::MalformedRule {
                        state: state.to_string(),
                        message: format!("guard references unknown symbol set '@{}'", pat),
                    });
                }
                if op == "@" {
                    GuardTest::In(pat.to_string())
                } else {
                    GuardTest::NotIn(pat.to_string())
                }
            }
            "~" | "!~" => {
                let template = Template::parse(pat);
                let rhs = if template.is_static() {
                    let regex = pattern::build_anchored(&format!("(?:{})$", pat), self.def.ignore_case)
                        .map_err(|message| CompileError::MalformedRule {
                            state: state.to_string(),
                            message: format!("invalid guard pattern '{}': {}", pat, message),
                        })?;
                    PatternRhs::Static(regex)
                } else {
                    PatternRhs::Dynamic(template)
                };
                if op == "~" {
                    GuardTest::Matches(rhs)
                } else {
                    GuardTest::NotMatches(rhs)
                }
            }
            _ => unreachable!(),
        };

        Ok(Guard::Expr { operand, test })
    }
}

fn parse_token_class(class: &str) -> TokenClass {
    match class {
        "@rematch" => TokenClass::Rematch,
        "@brackets" => TokenClass::Brackets,
        _ => TokenClass::Class(Template::parse(class)),
    }
}

/// Split a guard key into its operand reference and the remainder.
fn parse_operand(raw: &str) -> (Operand, &str) {
    let Some(body) = raw.strip_prefix('$') else {
        return (Operand::WholeMatch, raw);
    };

    if let Some(rest) = body.strip_prefix('#') {
        return (Operand::WholeMatch, rest);
    }

    let (stateful, digits_start) = match body.chars().next() {
        Some('S') | Some('s') => (true, 1),
        _ => (false, 0),
    };

    let digits: String = body[digits_start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .take(2)
        .collect();
    if digits.is_empty() {
        return (Operand::WholeMatch, raw);
    }

    let n: usize = match digits.parse() {
        Ok(n) => n,
        Err(_) => return (Operand::WholeMatch, raw),
    };
    let rest = &body[digits_start + digits.len()..];

    if stateful {
        (Operand::StateParam(n), rest)
    } else {
        (Operand::Capture(n), rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prism::grammar::loader::from_json_str;

    fn compile_json(source: &str) -> Result<CompiledGrammar, CompileError> {
        let def = from_json_str(source).unwrap();
        compile("test", &def)
    }

    #[test]
    fn test_missing_root_state() {
        let err = compile_json(r#"{"tokenizer": {"other": []}}"#).unwrap_err();
        assert_eq!(err, CompileError::MissingRootState);
    }

    #[test]
    fn test_unknown_push_target() {
        let err = compile_json(
            r#"{"tokenizer": {"root": [["\"", "string", "@missing"]]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::UnknownStateReference { .. }));
    }

    #[test]
    fn test_unknown_include_target() {
        let err = compile_json(
            r#"{"tokenizer": {"root": [{"include": "@nowhere"}]}}"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, CompileError::UnknownStateReference { reference, .. } if reference == "nowhere")
        );
    }

    #[test]
    fn test_cyclic_include() {
        let err = compile_json(
            r#"{"tokenizer": {
                "root": [{"include": "@a"}],
                "a": [{"include": "@b"}],
                "b": [{"include": "@a"}]
            }}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::CyclicInclude { .. }));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = compile_json(r#"{"tokenizer": {"root": [["(unclosed", "x"]]}}"#).unwrap_err();
        assert!(matches!(err, CompileError::InvalidPattern { .. }));
    }

    #[test]
    fn test_group_arity_mismatch() {
        let err = compile_json(
            r#"{"tokenizer": {"root": [["(a)(b)", ["one", "two", "three"]]]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::MalformedRule { .. }));
    }

    #[test]
    fn test_default_branch_must_be_last() {
        let err = compile_json(
            r#"{"tokenizer": {"root": [
                ["\\w+", {"cases": {"@default": "x", "@eos": "y"}}]
            ]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::MalformedRule { .. }));
    }

    #[test]
    fn test_parameterized_state_lookup() {
        let grammar = compile_json(
            r#"{"tokenizer": {
                "root": [["x", "a", "@body.param"]],
                "body": [["y", "b"]]
            }}"#,
        )
        .unwrap();
        assert!(grammar.state("body.param").is_some());
        assert!(grammar.state("body").is_some());
        assert!(grammar.state("missing").is_none());
    }

    #[test]
    fn test_set_interning_respects_ignore_case() {
        let grammar = compile_json(
            r#"{
                "ignoreCase": true,
                "keywords": ["IF", "Else"],
                "tokenizer": {"root": []}
            }"#,
        )
        .unwrap();
        assert!(grammar.set_contains("keywords", "if"));
        assert!(grammar.set_contains("keywords", "ELSE"));
        assert!(!grammar.set_contains("keywords", "while"));
    }

    #[test]
    fn test_guard_parsing_shapes() {
        let (operand, rest) = parse_operand("$#==$S2");
        assert_eq!(operand, Operand::WholeMatch);
        assert_eq!(rest, "==$S2");

        let (operand, rest) = parse_operand("$2@keywords");
        assert_eq!(operand, Operand::Capture(2));
        assert_eq!(rest, "@keywords");

        let (operand, rest) = parse_operand("$S3!=end");
        assert_eq!(operand, Operand::StateParam(3));
        assert_eq!(rest, "!=end");

        let (operand, rest) = parse_operand("true|false");
        assert_eq!(operand, Operand::WholeMatch);
        assert_eq!(rest, "true|false");
    }

    #[test]
    fn test_postfix_applies_to_nonempty_classes_only() {
        let grammar = compile_json(
            r#"{"tokenPostfix": ".gql", "tokenizer": {"root": []}}"#,
        )
        .unwrap();
        assert_eq!(grammar.postfixed("keyword"), "keyword.gql");
        assert_eq!(grammar.postfixed(""), "");
    }
}

//! Schema types for declarative grammar definitions
//!
//! A grammar is plain data: a handful of scalar options, named attribute
//! values (pattern fragments and symbol sets referenced as `@name`), and a
//! `tokenizer` table mapping state names to ordered rule lists.
//!
//! Rules come in the compact forms grammar authors actually write:
//!
//! - `["pattern", "token"]`
//! - `["pattern", "token", "@nextState"]`
//! - `["pattern", { "token": ..., "next": ..., "cases": {...}, ... }]`
//! - `["pattern", ["group-token", ...]]`
//! - `{ "include": "@otherState" }`
//!
//! Rule order within a state is significant (first match wins), and so is
//! the order of case branches, so both use order-preserving deserializers.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// The name of the state every grammar must define.
pub const ROOT_STATE: &str = "root";

/// A complete declarative grammar for one language.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarDefinition {
    /// Token class emitted when no rule matches the input.
    #[serde(default)]
    pub default_token: String,

    /// Suffix appended to every non-empty emitted token class.
    #[serde(default)]
    pub token_postfix: Option<String>,

    /// When true, patterns, symbol sets, and guard comparisons are
    /// case-insensitive.
    #[serde(default)]
    pub ignore_case: bool,

    /// Bracket pairs used by the `@brackets` token class and the
    /// `bracket` action field. Defaults to the standard four pairs.
    #[serde(default)]
    pub brackets: Option<Vec<BracketDefinition>>,

    /// State name -> ordered rule list. Must contain `root`.
    pub tokenizer: HashMap<String, Vec<RuleDefinition>>,

    /// All remaining top-level keys: pattern fragments (string values) and
    /// symbol sets (array values), referenced as `@name`.
    #[serde(flatten, default)]
    pub attributes: HashMap<String, AttributeValue>,
}

impl GrammarDefinition {
    /// Look up a symbol set attribute by name.
    pub fn symbol_set(&self, name: &str) -> Option<&[String]> {
        match self.attributes.get(name) {
            Some(AttributeValue::Set(words)) => Some(words),
            _ => None,
        }
    }

    /// Look up a pattern fragment attribute by name.
    pub fn pattern_fragment(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(AttributeValue::Pattern(src)) => Some(src),
            _ => None,
        }
    }
}

/// A named attribute: either a reusable pattern fragment or a symbol set.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Pattern(String),
    Set(Vec<String>),
}

/// One bracket pair with the token class it emits.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketDefinition {
    pub open: String,
    pub close: String,
    pub token: String,
}

impl BracketDefinition {
    pub fn new(open: &str, close: &str, token: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            token: token.to_string(),
        }
    }

    /// The standard bracket set assumed when a grammar declares none.
    pub fn standard() -> Vec<BracketDefinition> {
        vec![
            BracketDefinition::new("{", "}", "delimiter.curly"),
            BracketDefinition::new("[", "]", "delimiter.square"),
            BracketDefinition::new("(", ")", "delimiter.parenthesis"),
            BracketDefinition::new("<", ">", "delimiter.angle"),
        ]
    }
}

/// One entry in a state's rule list.
#[derive(Debug, Clone)]
pub enum RuleDefinition {
    /// Splice another state's rules in at this position.
    Include(String),
    /// A pattern with its action.
    Rule {
        pattern: String,
        action: ActionDefinition,
    },
}

/// What to do when a rule's pattern matches.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ActionDefinition {
    /// Emit a single token class (may contain `$n` substitutions, or be the
    /// special `@rematch` / `@brackets` classes).
    Token(String),
    /// One action per capture group.
    Group(Vec<ActionDefinition>),
    /// The full action object.
    Detailed(DetailedAction),
}

impl ActionDefinition {
    pub fn token(class: &str) -> Self {
        ActionDefinition::Token(class.to_string())
    }
}

/// The expanded action object form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAction {
    #[serde(default)]
    pub token: Option<String>,
    /// State transition: a state name (`@stateName`, optionally with
    /// `.`-separated parameters) or one of `@pop`, `@popall`, `@push`.
    #[serde(default)]
    pub next: Option<String>,
    /// Replace the top stack frame instead of pushing.
    #[serde(default)]
    pub switch_to: Option<String>,
    /// Enter (`"languageId"`) or leave (`"@pop"`) an embedded language.
    #[serde(default)]
    pub next_embedded: Option<String>,
    /// `@open` or `@close`; marks the token as a bracket side.
    #[serde(default)]
    pub bracket: Option<String>,
    /// Debug message logged when the rule fires (supports `$n`).
    #[serde(default)]
    pub log: Option<String>,
    /// Conditional dispatch: ordered guard -> action branches.
    #[serde(default)]
    pub cases: Option<CaseBranches>,
}

/// Ordered case branches of a `cases` action.
///
/// JSON/YAML maps lose their declared order with a plain `HashMap`, and the
/// resolver contract is first-satisfied-guard-in-declared-order, so branches
/// are captured as a vector of pairs in document order.
#[derive(Debug, Clone, Default)]
pub struct CaseBranches(pub Vec<(String, ActionDefinition)>);

impl<'de> Deserialize<'de> for CaseBranches {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BranchVisitor;

        impl<'de> Visitor<'de> for BranchVisitor {
            type Value = CaseBranches;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of guard strings to actions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut branches = Vec::new();
                while let Some((guard, action)) =
                    map.next_entry::<String, ActionDefinition>()?
                {
                    branches.push((guard, action));
                }
                Ok(CaseBranches(branches))
            }
        }

        deserializer.deserialize_map(BranchVisitor)
    }
}

impl<'de> Deserialize<'de> for RuleDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuleVisitor;

        impl<'de> Visitor<'de> for RuleVisitor {
            type Value = RuleDefinition;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [pattern, action, next?] sequence or an include object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut include = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "include" {
                        include = Some(map.next_value::<String>()?);
                    } else {
                        return Err(de::Error::unknown_field(&key, &["include"]));
                    }
                }
                match include {
                    Some(target) => Ok(RuleDefinition::Include(target)),
                    None => Err(de::Error::missing_field("include")),
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let pattern: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let action: ActionDefinition = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;

                // The 3-tuple form carries the next-state as a trailing string.
                let action = match seq.next_element::<String>()? {
                    None => action,
                    Some(next) => match action {
                        ActionDefinition::Token(token) => {
                            ActionDefinition::Detailed(DetailedAction {
                                token: Some(token),
                                next: Some(next),
                                ..DetailedAction::default()
                            })
                        }
                        ActionDefinition::Detailed(mut detailed) if detailed.next.is_none() => {
                            detailed.next = Some(next);
                            ActionDefinition::Detailed(detailed)
                        }
                        _ => {
                            return Err(de::Error::custom(
                                "trailing next-state requires a token or action-object rule",
                            ))
                        }
                    },
                };

                Ok(RuleDefinition::Rule { pattern, action })
            }
        }

        deserializer.deserialize_any(RuleVisitor)
    }
}

/// The editor-facing half of a language module: bracket/comment/folding
/// metadata. Not consumed by the engine itself, but carried alongside the
/// grammar so one registration covers the whole language.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfiguration {
    #[serde(default)]
    pub comments: Option<CommentConfiguration>,
    #[serde(default)]
    pub brackets: Vec<(String, String)>,
    #[serde(default)]
    pub auto_closing_pairs: Vec<ClosingPair>,
    #[serde(default)]
    pub surrounding_pairs: Vec<ClosingPair>,
    #[serde(default)]
    pub folding: Option<FoldingConfiguration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentConfiguration {
    #[serde(default)]
    pub line_comment: Option<String>,
    #[serde(default)]
    pub block_comment: Option<(String, String)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingPair {
    pub open: String,
    pub close: String,
    #[serde(default)]
    pub not_in: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldingConfiguration {
    #[serde(default)]
    pub off_side: Option<bool>,
    #[serde(default)]
    pub markers: Option<FoldingMarkers>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoldingMarkers {
    pub start: String,
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_tuple_rule() {
        let rule: RuleDefinition = serde_json::from_str(r#"["\\d+", "number"]"#).unwrap();
        match rule {
            RuleDefinition::Rule { pattern, action } => {
                assert_eq!(pattern, "\\d+");
                assert!(matches!(action, ActionDefinition::Token(t) if t == "number"));
            }
            _ => panic!("expected a pattern rule"),
        }
    }

    #[test]
    fn test_three_tuple_rule_folds_next() {
        let rule: RuleDefinition =
            serde_json::from_str(r#"["\"", "string", "@stringBody"]"#).unwrap();
        match rule {
            RuleDefinition::Rule { action, .. } => match action {
                ActionDefinition::Detailed(detailed) => {
                    assert_eq!(detailed.token.as_deref(), Some("string"));
                    assert_eq!(detailed.next.as_deref(), Some("@stringBody"));
                }
                _ => panic!("expected a detailed action"),
            },
            _ => panic!("expected a pattern rule"),
        }
    }

    #[test]
    fn test_include_rule() {
        let rule: RuleDefinition = serde_json::from_str(r#"{"include": "@whitespace"}"#).unwrap();
        assert!(matches!(rule, RuleDefinition::Include(target) if target == "@whitespace"));
    }

    #[test]
    fn test_group_action() {
        let rule: RuleDefinition =
            serde_json::from_str(r#"["(a)(b)", ["letter.a", "letter.b"]]"#).unwrap();
        match rule {
            RuleDefinition::Rule { action, .. } => match action {
                ActionDefinition::Group(parts) => assert_eq!(parts.len(), 2),
                _ => panic!("expected a group action"),
            },
            _ => panic!("expected a pattern rule"),
        }
    }

    #[test]
    fn test_cases_preserve_declared_order() {
        let rule: RuleDefinition = serde_json::from_str(
            r#"["\\w+", {"cases": {"@keywords": "keyword", "@eos": "last", "@default": ""}}]"#,
        )
        .unwrap();
        match rule {
            RuleDefinition::Rule { action, .. } => match action {
                ActionDefinition::Detailed(detailed) => {
                    let branches = detailed.cases.unwrap().0;
                    let guards: Vec<&str> = branches.iter().map(|(g, _)| g.as_str()).collect();
                    assert_eq!(guards, vec!["@keywords", "@eos", "@default"]);
                }
                _ => panic!("expected a detailed action"),
            },
            _ => panic!("expected a pattern rule"),
        }
    }

    #[test]
    fn test_grammar_top_level_attributes() {
        let grammar: GrammarDefinition = serde_json::from_str(
            r#"{
                "defaultToken": "invalid",
                "ignoreCase": true,
                "keywords": ["if", "else"],
                "symbols": "[=><!]+",
                "tokenizer": { "root": [["\\d+", "number"]] }
            }"#,
        )
        .unwrap();
        assert_eq!(grammar.default_token, "invalid");
        assert!(grammar.ignore_case);
        assert_eq!(grammar.symbol_set("keywords").unwrap().len(), 2);
        assert_eq!(grammar.pattern_fragment("symbols"), Some("[=><!]+"));
        assert!(grammar.tokenizer.contains_key(ROOT_STATE));
    }
}

//! Declarative grammar definitions
//!
//! This module provides:
//! - The definition schema (`GrammarDefinition` and friends) - what grammar
//!   authors write, in JSON, YAML, or directly in Rust
//! - Loading (`loader`) - reading definitions from strings and files
//!
//! Definitions are pure data. Nothing here executes a grammar; that is the
//! job of `compile` and `engine`.

pub mod definition;
pub mod loader;

pub use definition::{
    ActionDefinition, AttributeValue, BracketDefinition, CaseBranches, GrammarDefinition,
    LanguageConfiguration, RuleDefinition,
};
pub use loader::{from_json_str, from_path, from_yaml_str, LoadError};

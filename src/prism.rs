//! Core modules of the prism tokenizer
//!
//! The processing flow mirrors the lifetime of a grammar:
//!
//! - `grammar` - the declarative definition schema (what grammar authors write)
//! - `compile` - turns a definition into an immutable compiled grammar
//! - `engine` - executes a compiled grammar over source lines
//! - `registry` - caches compiled grammars per language id
//! - `languages` - builtin grammar definitions
//! - `highlight` - terminal rendering of token streams

pub mod compile;
pub mod engine;
pub mod grammar;
pub mod highlight;
pub mod languages;
pub mod registry;

pub use compile::{compile, CompileError, CompiledGrammar};
pub use engine::{LineState, LineTokens, Session, Token, TokenizeError};
pub use grammar::{GrammarDefinition, LanguageConfiguration};
pub use registry::GrammarRegistry;

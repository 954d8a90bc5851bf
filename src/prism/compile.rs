//! Grammar compilation
//!
//! This module provides:
//! - `compile` - the entry point turning a `GrammarDefinition` into an
//!   immutable `CompiledGrammar`
//! - `template` - `$n` / `$Sn` substitution templates for token classes,
//!   state names, and log messages
//! - `pattern` - `@name` reference expansion and regex construction
//! - `error` - the compile-time error taxonomy
//!
//! Compilation is a pure transform: deterministic, side-effect free, and
//! cacheable per grammar. All `include` directives are inlined (cycles are
//! rejected), symbol sets become hash sets, and every pattern becomes a
//! ready-to-run matcher anchored to the start of the remaining input.

pub mod compiler;
pub mod error;
pub mod pattern;
pub mod template;

pub use compiler::{
    compile, BracketSide, CaseBranch, CompiledAction, CompiledBracket, CompiledGrammar,
    CompiledRule, EmbeddedTransition, Guard, GuardTest, Operand, PatternRhs, TokenClass,
    TokenSpec, Transition,
};
pub use error::CompileError;
pub use template::{SubstitutionContext, Template};

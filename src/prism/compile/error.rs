//! Compile-time errors
//!
//! All of these are fatal to the grammar being compiled and only to it: a
//! registry that fails to compile one language leaves every other language
//! untouched.

use std::fmt;

/// Errors raised while compiling a grammar definition.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The grammar has no `root` state.
    MissingRootState,
    /// A push/next/switchTo/include target names a state the grammar does
    /// not define.
    UnknownStateReference { state: String, reference: String },
    /// A rule's pattern (after `@name` expansion) is not a valid regular
    /// expression.
    InvalidPattern {
        state: String,
        pattern: String,
        message: String,
    },
    /// `include` directives form a cycle.
    CyclicInclude { state: String, cycle: String },
    /// A rule or action is structurally invalid (bad guard, nested cases,
    /// group arity mismatch, conflicting transitions, ...).
    MalformedRule { state: String, message: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::MissingRootState => write!(f, "Grammar has no 'root' state"),
            CompileError::UnknownStateReference { state, reference } => {
                write!(f, "State '{}' references unknown state '{}'", state, reference)
            }
            CompileError::InvalidPattern {
                state,
                pattern,
                message,
            } => write!(
                f,
                "Invalid pattern /{}/ in state '{}': {}",
                pattern, state, message
            ),
            CompileError::CyclicInclude { state, cycle } => {
                write!(f, "Cyclic include in state '{}': {}", state, cycle)
            }
            CompileError::MalformedRule { state, message } => {
                write!(f, "Malformed rule in state '{}': {}", state, message)
            }
        }
    }
}

impl std::error::Error for CompileError {}

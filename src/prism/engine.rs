//! Grammar execution
//!
//! This module provides:
//! - `stack` - the per-document state stack and line-state snapshots
//! - `token` - the token output type and the merging token sink
//! - `cases` - case-table resolution against match data
//! - `executor` - the stepping engine over one line
//! - `session` - the per-document driver with incremental line snapshots
//!
//! Compiled grammars are immutable; all mutable tokenization state lives in
//! the session's `LineState`, so independent documents can be tokenized on
//! independent threads with no shared mutable state.

pub mod cases;
pub mod executor;
pub mod session;
pub mod stack;
pub mod token;

pub use executor::{Executor, TokenizeError};
pub use session::{LineTokens, Session};
pub use stack::{LineState, StateStack};
pub use token::Token;

//! # prism
//!
//! A grammar-driven incremental tokenizer for syntax highlighting.
//!
//! Languages are described as declarative state tables (named states, each an
//! ordered list of regex rules) and executed by one generic engine. The engine
//! tokenizes one line at a time and snapshots its state stack at each line
//! boundary, so re-tokenizing an edited line never requires re-processing the
//! whole document.
//!
//! ## Testing
//!
//! Engine behavior tests live in `tests/`; each module also carries unit tests
//! next to the code it exercises.

pub mod prism;

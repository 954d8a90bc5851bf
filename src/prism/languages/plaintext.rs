//! Plain text. Everything is one unstyled token per line.

use super::{load, Language};
use crate::prism::grammar::LoadError;

pub const ID: &str = "plaintext";

const CONFIGURATION: &str = r##"{
    "brackets": [],
    "autoClosingPairs": [],
    "surroundingPairs": []
}"##;

const GRAMMAR: &str = r##"{
    "defaultToken": "",
    "tokenPostfix": ".text",

    "tokenizer": {
        "root": [
            [".+", ""]
        ]
    }
}"##;

pub fn language() -> Result<Language, LoadError> {
    load(ID, GRAMMAR, Some(CONFIGURATION))
}

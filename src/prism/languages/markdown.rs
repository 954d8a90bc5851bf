//! Markdown grammar.
//!
//! A line-oriented subset: headers, lists, quotes, emphasis, code spans,
//! fenced code blocks, and links. It mostly exists as the embed target for
//! block strings in other grammars.

use super::{load, Language};
use crate::prism::grammar::LoadError;

pub const ID: &str = "markdown";

const CONFIGURATION: &str = r##"{
    "comments": {
        "blockComment": ["<!--", "-->"]
    },
    "brackets": [
        ["{", "}"],
        ["[", "]"],
        ["(", ")"]
    ],
    "autoClosingPairs": [
        { "open": "{", "close": "}" },
        { "open": "[", "close": "]" },
        { "open": "(", "close": ")" }
    ],
    "surroundingPairs": [
        { "open": "(", "close": ")" },
        { "open": "[", "close": "]" },
        { "open": "*", "close": "*" },
        { "open": "_", "close": "_" },
        { "open": "`", "close": "`" }
    ],
    "folding": {
        "markers": {
            "start": "^\\s*<!--\\s*#?region\\b.*-->",
            "end": "^\\s*<!--\\s*#?endregion\\b.*-->"
        }
    }
}"##;

const GRAMMAR: &str = r##"{
    "defaultToken": "",
    "tokenPostfix": ".md",

    "tokenizer": {
        "root": [
            ["^\\s*#{1,6}\\s.*$", "keyword"],
            ["^\\s*(=+|\\-+)\\s*$", "keyword"],
            ["^\\s*>+", "comment"],
            ["^\\s*([*\\-+]|\\d+\\.)\\s", "keyword"],

            ["```", "string", "@codeblock"],

            ["\\*\\*[^*]+\\*\\*", "strong"],
            ["__[^_]+__", "strong"],
            ["\\*[^*]+\\*", "emphasis"],
            ["_[^_]+_", "emphasis"],
            ["`[^`]+`", "variable.source"],

            ["(\\[)([^\\]]*)(\\]\\()([^)]+)(\\))", ["string.link", "", "string.link", "variable.source", "string.link"]],

            ["[^#*_`\\[\\\\]+", ""],
            ["\\\\.", "string.escape"],
            [".", ""]
        ],

        "codeblock": [
            ["```", "string", "@pop"],
            [".+$", "variable.source"]
        ]
    }
}"##;

pub fn language() -> Result<Language, LoadError> {
    load(ID, GRAMMAR, Some(CONFIGURATION))
}

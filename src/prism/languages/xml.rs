//! XML grammar.
//!
//! Case-insensitive, with a shared `qualifiedName` fragment for element and
//! attribute names. Matching is first-match within a state, so the ordered
//! attribute alternatives in `tag` fall from fully quoted values down to
//! unterminated ones.

use super::{load, Language};
use crate::prism::grammar::LoadError;

pub const ID: &str = "xml";

const CONFIGURATION: &str = r##"{
    "comments": {
        "blockComment": ["<!--", "-->"]
    },
    "brackets": [
        ["<", ">"]
    ],
    "autoClosingPairs": [
        { "open": "<", "close": ">" },
        { "open": "'", "close": "'" },
        { "open": "\"", "close": "\"" }
    ],
    "surroundingPairs": [
        { "open": "<", "close": ">" },
        { "open": "'", "close": "'" },
        { "open": "\"", "close": "\"" }
    ]
}"##;

const GRAMMAR: &str = r##"{
    "defaultToken": "",
    "tokenPostfix": ".xml",
    "ignoreCase": true,

    "qualifiedName": "(?:[\\w.\\-]+:)?[\\w.\\-]+",

    "tokenizer": {
        "root": [
            ["[^<&]+", ""],
            { "include": "@whitespace" },

            ["(<)(@qualifiedName)", [
                { "token": "delimiter" },
                { "token": "tag", "next": "@tag" }
            ]],
            ["(</)(@qualifiedName)(\\s*)(>)", [
                { "token": "delimiter" },
                { "token": "tag" },
                "",
                { "token": "delimiter" }
            ]],

            ["(<\\?)(@qualifiedName)", [
                { "token": "delimiter" },
                { "token": "metatag", "next": "@tag" }
            ]],
            ["(<!)(@qualifiedName)", [
                { "token": "delimiter" },
                { "token": "metatag", "next": "@tag" }
            ]],

            ["<!\\[CDATA\\[", { "token": "delimiter.cdata", "next": "@cdata" }],

            ["&\\w+;", "string.escape"]
        ],

        "cdata": [
            ["[^\\]]+", ""],
            ["\\]\\]>", { "token": "delimiter.cdata", "next": "@pop" }],
            ["\\]", ""]
        ],

        "tag": [
            ["[ \\t\\r\\n]+", ""],
            ["(@qualifiedName)(\\s*=\\s*)(\"[^\"]*\"|'[^']*')", ["attribute.name", "", "attribute.value"]],
            ["(@qualifiedName)(\\s*=\\s*)(\"[^\">]*|'[^'>]*)", ["attribute.name", "", "attribute.value"]],
            ["(@qualifiedName)", "attribute.name"],
            ["\\?>", { "token": "delimiter", "next": "@pop" }],
            ["(/)(>)", [
                { "token": "tag" },
                { "token": "delimiter", "next": "@pop" }
            ]],
            [">", { "token": "delimiter", "next": "@pop" }]
        ],

        "whitespace": [
            ["[ \\t\\r\\n]+", ""],
            ["<!--", { "token": "comment", "next": "@comment" }]
        ],

        "comment": [
            ["[^<\\-]+", "comment.content"],
            ["-->", { "token": "comment", "next": "@pop" }],
            ["<!--", "comment.content.invalid"],
            ["[<\\-]", "comment.content"]
        ]
    }
}"##;

pub fn language() -> Result<Language, LoadError> {
    load(ID, GRAMMAR, Some(CONFIGURATION))
}

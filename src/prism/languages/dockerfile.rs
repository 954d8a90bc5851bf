//! Dockerfile grammar.
//!
//! Instructions push into `arguments`, which runs to end of line; strings
//! and `${...}` variable references are recognized inside arguments.

use super::{load, Language};
use crate::prism::grammar::LoadError;

pub const ID: &str = "dockerfile";

const CONFIGURATION: &str = r##"{
    "brackets": [
        ["{", "}"],
        ["[", "]"],
        ["(", ")"]
    ],
    "autoClosingPairs": [
        { "open": "{", "close": "}" },
        { "open": "[", "close": "]" },
        { "open": "(", "close": ")" },
        { "open": "\"", "close": "\"" },
        { "open": "'", "close": "'" }
    ],
    "surroundingPairs": [
        { "open": "{", "close": "}" },
        { "open": "[", "close": "]" },
        { "open": "(", "close": ")" },
        { "open": "\"", "close": "\"" },
        { "open": "'", "close": "'" }
    ]
}"##;

const GRAMMAR: &str = r##"{
    "defaultToken": "",
    "tokenPostfix": ".dockerfile",

    "variable": "\\$\\{?[\\w]+\\}?",

    "tokenizer": {
        "root": [
            { "include": "@whitespace" },
            { "include": "@comment" },

            ["(ONBUILD)(\\s+)", ["keyword", ""]],
            ["(ENV)(\\s+)([\\w]+)", ["keyword", "", { "token": "variable", "next": "@arguments" }]],

            ["(FROM|MAINTAINER|RUN|EXPOSE|ENV|ADD|ARG|VOLUME|LABEL|USER|WORKDIR|COPY|CMD|STOPSIGNAL|SHELL|HEALTHCHECK|ENTRYPOINT)", { "token": "keyword", "next": "@arguments" }]
        ],

        "arguments": [
            { "include": "@whitespace" },
            { "include": "@strings" },

            ["(@variable)", {
                "cases": {
                    "@eos": { "token": "variable", "next": "@popall" },
                    "@default": "variable"
                }
            }],
            ["\\\\", {
                "cases": {
                    "@eos": "",
                    "@default": ""
                }
            }],
            [".", {
                "cases": {
                    "@eos": { "token": "", "next": "@popall" },
                    "@default": ""
                }
            }]
        ],

        "whitespace": [
            ["\\s+", {
                "cases": {
                    "@eos": { "token": "", "next": "@popall" },
                    "@default": ""
                }
            }]
        ],

        "comment": [
            ["(^#.*$)", "comment", "@popall"]
        ],

        "strings": [
            ["'$", "string", "@popall"],
            ["'", "string", "@stringBody"],
            ["\"$", "string", "@popall"],
            ["\"", "string", "@dblStringBody"]
        ],
        "stringBody": [
            ["[^\\\\\\$']", {
                "cases": {
                    "@eos": { "token": "string", "next": "@popall" },
                    "@default": "string"
                }
            }],
            ["\\\\.", "string.escape"],
            ["'$", "string", "@popall"],
            ["'", "string", "@pop"],
            ["(@variable)", "variable"],
            ["\\\\$", "string"],
            ["$", "string", "@popall"]
        ],
        "dblStringBody": [
            ["[^\\\\\\$\"]", {
                "cases": {
                    "@eos": { "token": "string", "next": "@popall" },
                    "@default": "string"
                }
            }],
            ["\\\\.", "string.escape"],
            ["\"$", "string", "@popall"],
            ["\"", "string", "@pop"],
            ["(@variable)", "variable"],
            ["\\\\$", "string"],
            ["$", "string", "@popall"]
        ]
    }
}"##;

pub fn language() -> Result<Language, LoadError> {
    load(ID, GRAMMAR, Some(CONFIGURATION))
}

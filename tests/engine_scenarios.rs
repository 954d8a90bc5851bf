//! End-to-end tokenization scenarios over the bundled grammars.
//!
//! These drive whole lines through real grammars and check the emitted
//! token stream and the end-of-line state, including nested-state entry and
//! exit, embedded languages, and parameterized state back-references.

use std::sync::Arc;

use prism::prism::engine::Token;
use prism::prism::grammar::from_json_str;
use prism::prism::registry::{self, GrammarRegistry};

fn classes(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.class.as_str()).collect()
}

fn token_covering<'a>(tokens: &'a [Token], offset: usize) -> &'a Token {
    tokens
        .iter()
        .find(|t| t.offset <= offset && offset < t.offset + t.length)
        .unwrap_or_else(|| panic!("no token covers offset {}", offset))
}

#[test]
fn dockerfile_env_line() {
    let registry = registry::shared();
    let mut session = registry.open_session("dockerfile").unwrap();

    let line = session.tokenize_line("ENV FOO bar");
    assert_eq!(
        line.tokens,
        vec![
            Token::new(0, 3, "keyword.dockerfile"),
            Token::new(3, 1, ""),
            Token::new(4, 3, "variable.dockerfile"),
            Token::new(7, 4, ""),
        ]
    );
    // the @eos case popped all the way back
    assert_eq!(line.end_state.current_state(), "root");
}

#[test]
fn dockerfile_instruction_without_arguments_stays_in_arguments() {
    let registry = registry::shared();
    let mut session = registry.open_session("dockerfile").unwrap();

    let line = session.tokenize_line("RUN");
    assert_eq!(classes(&line.tokens), vec!["keyword.dockerfile"]);
    assert_eq!(line.end_state.current_state(), "arguments");
}

#[test]
fn dockerfile_comment_line() {
    let registry = registry::shared();
    let mut session = registry.open_session("dockerfile").unwrap();

    let line = session.tokenize_line("# a comment");
    assert_eq!(line.tokens, vec![Token::new(0, 11, "comment.dockerfile")]);
}

#[test]
fn graphql_block_string_embeds_markdown() {
    let registry = registry::shared();
    let mut session = registry.open_session("graphql").unwrap();

    let line = session.tokenize_line("\"\"\"hello\"\"\"");
    assert_eq!(
        line.tokens,
        vec![
            Token::new(0, 3, "string.gql"),
            Token::new(3, 5, ""),
            Token::new(8, 3, "string.gql"),
        ]
    );
    assert!(!line.end_state.in_embedded());
    assert_eq!(line.end_state.current_state(), "root");
}

#[test]
fn graphql_block_string_spans_lines() {
    let registry = registry::shared();
    let mut session = registry.open_session("graphql").unwrap();

    let first = session.tokenize_line("\"\"\"# heading");
    assert!(first.end_state.in_embedded());
    // the interior is tokenized by the markdown grammar
    assert_eq!(
        first.tokens,
        vec![Token::new(0, 3, "string.gql"), Token::new(3, 9, "keyword.md")]
    );

    let second = session.tokenize_line("done\"\"\"");
    assert_eq!(
        second.tokens,
        vec![Token::new(0, 4, ""), Token::new(4, 3, "string.gql")]
    );
    assert!(!second.end_state.in_embedded());
}

#[test]
fn graphql_keywords_and_identifiers() {
    let registry = registry::shared();
    let mut session = registry.open_session("graphql").unwrap();

    let line = session.tokenize_line("query GetUser {");
    assert_eq!(token_covering(&line.tokens, 0).class, "keyword.gql");
    assert_eq!(token_covering(&line.tokens, 6).class, "type.identifier.gql");
    assert_eq!(token_covering(&line.tokens, 14).class, "delimiter.curly.gql");
}

#[test]
fn xml_comment_uses_ordered_alternation() {
    let registry = registry::shared();
    let mut session = registry.open_session("xml").unwrap();

    let line = session.tokenize_line("<!-- a -- b -->");
    assert_eq!(
        line.tokens,
        vec![
            Token::new(0, 4, "comment.xml"),
            Token::new(4, 8, "comment.content.xml"),
            Token::new(12, 3, "comment.xml"),
        ]
    );
    assert_eq!(line.end_state.current_state(), "root");
}

#[test]
fn xml_open_tag_with_attribute() {
    let registry = registry::shared();
    let mut session = registry.open_session("xml").unwrap();

    let line = session.tokenize_line("<a href=\"x\">");
    assert_eq!(token_covering(&line.tokens, 0).class, "delimiter.xml");
    assert_eq!(token_covering(&line.tokens, 1).class, "tag.xml");
    assert_eq!(token_covering(&line.tokens, 3).class, "attribute.name.xml");
    assert_eq!(token_covering(&line.tokens, 8).class, "attribute.value.xml");
    assert_eq!(token_covering(&line.tokens, 11).class, "delimiter.xml");
}

#[test]
fn xml_comment_state_survives_line_breaks() {
    let registry = registry::shared();
    let mut session = registry.open_session("xml").unwrap();

    let first = session.tokenize_line("<!-- open");
    assert_eq!(first.end_state.current_state(), "comment");

    let second = session.tokenize_line("still inside -->");
    assert_eq!(token_covering(&second.tokens, 0).class, "comment.content.xml");
    assert_eq!(second.end_state.current_state(), "root");
}

#[test]
fn shell_brackets_emit_per_pair_classes() {
    let registry = registry::shared();
    let mut session = registry.open_session("shell").unwrap();

    let line = session.tokenize_line("if [ -f x ]; then");
    assert_eq!(token_covering(&line.tokens, 0).class, "keyword.shell");
    assert_eq!(token_covering(&line.tokens, 3).class, "delimiter.square.shell");
    assert_eq!(token_covering(&line.tokens, 5).class, "attribute.name.shell");
    assert_eq!(token_covering(&line.tokens, 10).class, "delimiter.square.shell");
    assert_eq!(token_covering(&line.tokens, 13).class, "keyword.shell");
}

#[test]
fn shell_single_quoted_string_spans_lines() {
    let registry = registry::shared();
    let mut session = registry.open_session("shell").unwrap();

    let first = session.tokenize_line("echo 'hello");
    assert_eq!(first.end_state.current_state(), "stringBody");

    let second = session.tokenize_line("world'");
    assert_eq!(second.tokens, vec![Token::new(0, 6, "string.shell")]);
    assert_eq!(second.end_state.current_state(), "root");
}

#[test]
fn shell_comments_are_case_insensitive_keywords_too() {
    let registry = registry::shared();
    let mut session = registry.open_session("shell").unwrap();

    // ignoreCase: IF matches the `if` keyword
    let line = session.tokenize_line("IF true");
    assert_eq!(token_covering(&line.tokens, 0).class, "keyword.shell");
}

const HEREDOC_STYLE: &str = r##"{
    "defaultToken": "",
    "tokenizer": {
        "root": [
            ["<<(\\w+)", { "token": "keyword", "next": "@body.$1" }],
            ["\\w+", "identifier"],
            ["\\s+", "white"]
        ],
        "body": [
            ["\\w+", {
                "cases": {
                    "$#==$S2": { "token": "keyword", "next": "@pop" },
                    "@default": "string"
                }
            }],
            ["\\s+", "white"]
        ]
    }
}"##;

#[test]
fn parameterized_state_closes_on_matching_delimiter() {
    let registry = Arc::new(GrammarRegistry::new());
    registry.register("heredoc", from_json_str(HEREDOC_STYLE).unwrap(), None);
    let mut session = registry.open_session("heredoc").unwrap();

    let opened = session.tokenize_line("<<EOF");
    assert_eq!(classes(&opened.tokens), vec!["keyword"]);
    assert_eq!(opened.end_state.current_state(), "body.EOF");

    // an in-between line that happens to contain another word
    let body = session.tokenize_line("EOT");
    assert_eq!(classes(&body.tokens), vec!["string"]);
    assert_eq!(body.end_state.current_state(), "body.EOF");

    let closed = session.tokenize_line("EOF");
    assert_eq!(classes(&closed.tokens), vec!["keyword"]);
    assert_eq!(closed.end_state.current_state(), "root");
}

#[test]
fn nested_parameterized_states_close_independently() {
    let registry = Arc::new(GrammarRegistry::new());
    registry.register("heredoc", from_json_str(HEREDOC_STYLE).unwrap(), None);
    let mut session = registry.open_session("heredoc").unwrap();

    session.tokenize_line("<<OUTER");
    // `body` has no `<<` rule, so the next opener is just a string; push a
    // second frame through the root grammar instead by closing first.
    let closed = session.tokenize_line("OUTER");
    assert_eq!(closed.end_state.current_state(), "root");

    session.tokenize_line("<<INNER");
    let closed = session.tokenize_line("INNER");
    assert_eq!(closed.end_state.current_state(), "root");
}

const REMATCH_STYLE: &str = r#"{
    "defaultToken": "",
    "tokenPostfix": ".t",
    "tokenizer": {
        "root": [
            ["end", "keyword"],
            ["\\w+", { "token": "word", "next": "@value" }],
            ["\\s+", "white"]
        ],
        "value": [
            ["end", { "token": "@rematch", "next": "@pop" }],
            ["\\w+", "value"],
            ["\\s+", "white"]
        ]
    }
}"#;

#[test]
fn rematch_rescans_the_delimiter_after_popping() {
    let registry = Arc::new(GrammarRegistry::new());
    registry.register("rematch", from_json_str(REMATCH_STYLE).unwrap(), None);
    let mut session = registry.open_session("rematch").unwrap();

    // `end` terminates the value state without being consumed there; the
    // rescan in root classifies it as a keyword, at its original offset.
    let line = session.tokenize_line("a b end");
    assert_eq!(
        line.tokens,
        vec![
            Token::new(0, 1, "word.t"),
            Token::new(1, 1, "white.t"),
            Token::new(2, 1, "value.t"),
            Token::new(3, 1, "white.t"),
            Token::new(4, 3, "keyword.t"),
        ]
    );
    assert_eq!(line.end_state.current_state(), "root");
}

const SWITCH_STYLE: &str = r#"{
    "defaultToken": "",
    "tokenPostfix": ".t",
    "tokenizer": {
        "root": [
            ["\\{", { "token": "delimiter", "next": "@header" }],
            ["\\w+", "identifier"]
        ],
        "header": [
            [";", { "token": "delimiter", "switchTo": "@body" }],
            ["\\w+", "attribute"]
        ],
        "body": [
            ["\\}", { "token": "delimiter", "next": "@pop" }],
            ["\\w+", "value"]
        ]
    }
}"#;

#[test]
fn switch_to_replaces_the_top_frame_without_growing_the_stack() {
    let registry = Arc::new(GrammarRegistry::new());
    registry.register("switch", from_json_str(SWITCH_STYLE).unwrap(), None);
    let mut session = registry.open_session("switch").unwrap();

    let opened = session.tokenize_line("{k;");
    assert_eq!(
        classes(&opened.tokens),
        vec!["delimiter.t", "attribute.t", "delimiter.t"]
    );
    assert_eq!(opened.end_state.current_state(), "body");
    // header was replaced, not stacked under body
    assert_eq!(opened.end_state.stack_depth(), 2);

    let closed = session.tokenize_line("v}");
    assert_eq!(classes(&closed.tokens), vec!["value.t", "delimiter.t"]);
    assert_eq!(closed.end_state.current_state(), "root");
    assert_eq!(closed.end_state.stack_depth(), 1);
}

#[test]
fn log_action_substitutes_and_still_emits_its_token() {
    let grammar = r#"{
        "defaultToken": "",
        "tokenizer": {
            "root": [
                ["@\\w+", { "token": "annotation", "log": "annotation $0 in $S0" }],
                ["\\s+", "white"]
            ]
        }
    }"#;
    let registry = Arc::new(GrammarRegistry::new());
    registry.register("logging", from_json_str(grammar).unwrap(), None);
    let mut session = registry.open_session("logging").unwrap();

    let line = session.tokenize_line("@user");
    assert_eq!(line.tokens, vec![Token::new(0, 5, "annotation")]);
}

//! Command-line interface for prism
//! This binary tokenizes and highlights source files using the bundled (or
//! user-supplied) grammars.
//!
//! Usage:
//!   prism tokenize --language `<id>` `<path>` [--format `<format>`]  - Print the token stream
//!   prism highlight --language `<id>` `<path>`                     - Render with ANSI colors
//!   prism check `<grammar>`                                      - Compile a grammar file and report errors
//!   prism list-languages                                       - List bundled languages

use clap::{Arg, Command};
use prism::prism::engine::LineTokens;
use prism::prism::grammar;
use prism::prism::highlight::{self, Theme};
use prism::prism::registry;

fn main() {
    env_logger::init();

    let matches = Command::new("prism")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A grammar-driven tokenizer for syntax highlighting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokenize")
                .about("Print the token stream of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to tokenize")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("language")
                        .long("language")
                        .short('l')
                        .help("Language identifier (see list-languages)")
                        .required(true),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('simple' or 'json')")
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("highlight")
                .about("Render a file with ANSI colors")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to highlight")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("language")
                        .long("language")
                        .short('l')
                        .help("Language identifier (see list-languages)")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Compile a grammar file (.json or .yaml) and report errors")
                .arg(
                    Arg::new("grammar")
                        .help("Path to the grammar file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-languages").about("List bundled languages"))
        .get_matches();

    match matches.subcommand() {
        Some(("tokenize", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let language = sub.get_one::<String>("language").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_tokenize_command(path, language, format);
        }
        Some(("highlight", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let language = sub.get_one::<String>("language").unwrap();
            handle_highlight_command(path, language);
        }
        Some(("check", sub)) => {
            let grammar = sub.get_one::<String>("grammar").unwrap();
            handle_check_command(grammar);
        }
        Some(("list-languages", _)) => {
            handle_list_languages_command();
        }
        _ => unreachable!(),
    }
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

fn tokenize_source(language: &str, source: &str) -> Vec<LineTokens> {
    let registry = registry::shared();
    let mut session = registry.open_session(language).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    session.tokenize_all(source)
}

/// Handle the tokenize command
fn handle_tokenize_command(path: &str, language: &str, format: &str) {
    let source = read_source(path);
    let lines = tokenize_source(language, &source);

    match format {
        "simple" => {
            for (line, tokens) in source.split('\n').zip(&lines) {
                for token in &tokens.tokens {
                    println!(
                        "{}..{}\t{}\t{:?}",
                        token.offset,
                        token.offset + token.length,
                        if token.class.is_empty() { "-" } else { &token.class },
                        token.text(line)
                    );
                }
            }
        }
        "json" => {
            let tokens: Vec<_> = lines.iter().map(|line| &line.tokens).collect();
            let output = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", output);
        }
        other => {
            eprintln!("Unknown format '{}' (expected 'simple' or 'json')", other);
            std::process::exit(1);
        }
    }
}

/// Handle the highlight command
fn handle_highlight_command(path: &str, language: &str) {
    let source = read_source(path);
    let lines = tokenize_source(language, &source);
    let theme = Theme::dark();

    for (line, tokens) in source.split('\n').zip(&lines) {
        println!("{}", highlight::render_line(&theme, line, &tokens.tokens));
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let definition = grammar::from_path(std::path::Path::new(path)).unwrap_or_else(|e| {
        eprintln!("Error loading grammar: {}", e);
        std::process::exit(1);
    });

    match prism::prism::compile::compile("check", &definition) {
        Ok(compiled) => {
            println!(
                "OK: {} states, {} symbol sets",
                compiled.state_names().count(),
                compiled.set_names().count()
            );
        }
        Err(e) => {
            eprintln!("Grammar error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the list-languages command
fn handle_list_languages_command() {
    let registry = registry::shared();
    println!("Bundled languages:\n");
    for id in registry.languages() {
        println!("  {}", id);
    }
}

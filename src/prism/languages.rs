//! Bundled language grammars
//!
//! Each language ships as embedded JSON and is parsed straight into a
//! [`GrammarDefinition`](crate::prism::grammar::GrammarDefinition) on load,
//! which preserves the declared order of case tables and rules.

use crate::prism::grammar::{
    from_json_str, GrammarDefinition, LanguageConfiguration, LoadError,
};

pub mod dockerfile;
pub mod graphql;
pub mod markdown;
pub mod plaintext;
pub mod shell;
pub mod xml;

/// One bundled language, ready to register.
pub struct Language {
    pub id: &'static str,
    pub definition: GrammarDefinition,
    pub configuration: Option<LanguageConfiguration>,
}

fn load(
    id: &'static str,
    grammar: &str,
    configuration: Option<&str>,
) -> Result<Language, LoadError> {
    let definition = from_json_str(grammar)?;
    let configuration = match configuration {
        Some(text) => Some(serde_json::from_str(text).map_err(|e| LoadError::Json(e.to_string()))?),
        None => None,
    };
    Ok(Language {
        id,
        definition,
        configuration,
    })
}

/// All bundled languages. Load failures are reported per language so one
/// bad grammar cannot take the rest down.
pub fn builtins() -> Vec<Result<Language, LoadError>> {
    vec![
        dockerfile::language(),
        graphql::language(),
        markdown::language(),
        plaintext::language(),
        shell::language(),
        xml::language(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prism::compile::compile;

    #[test]
    fn test_every_builtin_loads_and_compiles() {
        for built in builtins() {
            let language = built.unwrap();
            compile(language.id, &language.definition)
                .unwrap_or_else(|err| panic!("{}: {}", language.id, err));
        }
    }

    #[test]
    fn test_builtin_ids_are_unique_and_sorted() {
        let ids: Vec<&str> = builtins()
            .into_iter()
            .map(|built| built.unwrap().id)
            .collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }
}

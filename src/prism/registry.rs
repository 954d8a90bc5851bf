//! Language registry
//!
//! Maps language identifiers to grammar definitions, editor configurations,
//! and lazily compiled grammars. The registry is the lookup point for
//! embedded-language tokenization, so a session keeps a handle to the
//! registry it was opened from.

use crate::prism::compile::{compile, CompileError, CompiledGrammar};
use crate::prism::engine::Session;
use crate::prism::grammar::{GrammarDefinition, LanguageConfiguration};
use crate::prism::languages;
use log::error;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    UnknownLanguage(String),
    Compile(CompileError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownLanguage(id) => write!(f, "Unknown language '{}'", id),
            RegistryError::Compile(err) => write!(f, "Grammar failed to compile: {}", err),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<CompileError> for RegistryError {
    fn from(err: CompileError) -> Self {
        RegistryError::Compile(err)
    }
}

/// Thread-safe registry of grammars, compiled on first use.
pub struct GrammarRegistry {
    definitions: RwLock<HashMap<String, Arc<GrammarDefinition>>>,
    configurations: RwLock<HashMap<String, Arc<LanguageConfiguration>>>,
    compiled: RwLock<HashMap<String, Arc<CompiledGrammar>>>,
}

impl GrammarRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            definitions: RwLock::new(HashMap::new()),
            configurations: RwLock::new(HashMap::new()),
            compiled: RwLock::new(HashMap::new()),
        }
    }

    /// A registry preloaded with the bundled languages. A bundled grammar
    /// that fails to load is logged and skipped rather than failing the
    /// whole registry.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for built in languages::builtins() {
            match built {
                Ok(language) => {
                    registry.register(language.id, language.definition, language.configuration);
                }
                Err(err) => error!("skipping bundled language: {}", err),
            }
        }
        registry
    }

    /// Register (or replace) a language. Replacing drops any cached
    /// compilation.
    pub fn register(
        &self,
        id: impl Into<String>,
        definition: GrammarDefinition,
        configuration: Option<LanguageConfiguration>,
    ) {
        let id = id.into();
        self.compiled.write().unwrap().remove(&id);
        if let Some(configuration) = configuration {
            self.configurations
                .write()
                .unwrap()
                .insert(id.clone(), Arc::new(configuration));
        }
        self.definitions
            .write()
            .unwrap()
            .insert(id, Arc::new(definition));
    }

    /// The compiled grammar for `id`, compiling and caching it on first
    /// request.
    pub fn grammar(&self, id: &str) -> Result<Arc<CompiledGrammar>, RegistryError> {
        if let Some(grammar) = self.compiled.read().unwrap().get(id) {
            return Ok(Arc::clone(grammar));
        }

        let definition = self
            .definitions
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownLanguage(id.to_string()))?;

        let grammar = Arc::new(compile(id, &definition)?);
        self.compiled
            .write()
            .unwrap()
            .insert(id.to_string(), Arc::clone(&grammar));
        Ok(grammar)
    }

    /// The editor configuration registered for `id`, if any.
    pub fn configuration(&self, id: &str) -> Option<Arc<LanguageConfiguration>> {
        self.configurations.read().unwrap().get(id).cloned()
    }

    /// Registered language identifiers, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.definitions.read().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Open a tokenization session for `id`. The session holds the registry
    /// so embedded languages resolve against the same set of grammars.
    pub fn open_session(self: &Arc<Self>, id: &str) -> Result<Session, RegistryError> {
        let grammar = self.grammar(id)?;
        Ok(Session::open(grammar, Arc::clone(self)))
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry of bundled languages.
pub fn shared() -> Arc<GrammarRegistry> {
    static SHARED: Lazy<Arc<GrammarRegistry>> =
        Lazy::new(|| Arc::new(GrammarRegistry::with_defaults()));
    Arc::clone(&SHARED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prism::grammar::from_json_str;

    const TINY: &str = r#"{
        "defaultToken": "",
        "tokenizer": { "root": [ ["[a-z]+", "word"] ] }
    }"#;

    #[test]
    fn test_unknown_language_is_an_error() {
        let registry = GrammarRegistry::new();
        assert!(matches!(
            registry.grammar("nope"),
            Err(RegistryError::UnknownLanguage(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_grammar_is_compiled_once_and_shared() {
        let registry = GrammarRegistry::new();
        registry.register("tiny", from_json_str(TINY).unwrap(), None);

        let first = registry.grammar("tiny").unwrap();
        let second = registry.grammar("tiny").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_reregister_invalidates_cache() {
        let registry = GrammarRegistry::new();
        registry.register("tiny", from_json_str(TINY).unwrap(), None);
        let before = registry.grammar("tiny").unwrap();

        registry.register("tiny", from_json_str(TINY).unwrap(), None);
        let after = registry.grammar("tiny").unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_defaults_include_bundled_languages() {
        let registry = GrammarRegistry::with_defaults();
        let ids = registry.languages();
        for id in ["dockerfile", "graphql", "markdown", "plaintext", "shell", "xml"] {
            assert!(ids.contains(&id.to_string()), "missing {}", id);
        }
    }

    #[test]
    fn test_bundled_grammars_all_compile() {
        let registry = GrammarRegistry::with_defaults();
        for id in registry.languages() {
            registry.grammar(&id).unwrap_or_else(|err| panic!("{}: {}", id, err));
        }
    }

    #[test]
    fn test_open_session_through_shared_registry() {
        let registry = shared();
        let session = registry.open_session("shell").unwrap();
        assert_eq!(session.language(), "shell");
    }
}

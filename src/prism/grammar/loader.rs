//! Loading grammar definitions from documents
//!
//! Grammars are authored as JSON or YAML documents following the schema in
//! `definition`. Loading performs no validation beyond deserialization;
//! structural validation (root state, state references, pattern syntax)
//! happens in `compile`.

use crate::prism::grammar::definition::GrammarDefinition;
use std::fmt;
use std::fs;
use std::path::Path;

/// Errors while reading a grammar document.
#[derive(Debug)]
pub enum LoadError {
    Io(String),
    Json(String),
    Yaml(String),
    /// The file extension is not one of `.json`, `.yaml`, `.yml`.
    UnknownFormat(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "IO error: {}", msg),
            LoadError::Json(msg) => write!(f, "JSON error: {}", msg),
            LoadError::Yaml(msg) => write!(f, "YAML error: {}", msg),
            LoadError::UnknownFormat(ext) => write!(f, "Unknown grammar format: {}", ext),
        }
    }
}

impl std::error::Error for LoadError {}

/// Parse a grammar definition from a JSON document.
pub fn from_json_str(source: &str) -> Result<GrammarDefinition, LoadError> {
    serde_json::from_str(source).map_err(|e| LoadError::Json(e.to_string()))
}

/// Parse a grammar definition from a YAML document.
pub fn from_yaml_str(source: &str) -> Result<GrammarDefinition, LoadError> {
    serde_yaml::from_str(source).map_err(|e| LoadError::Yaml(e.to_string()))
}

/// Read a grammar definition from a file, dispatching on extension.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<GrammarDefinition, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io(e.to_string()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => from_json_str(&content),
        "yaml" | "yml" => from_yaml_str(&content),
        other => Err(LoadError::UnknownFormat(other.to_string())),
    }
}

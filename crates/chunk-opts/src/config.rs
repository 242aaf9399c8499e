//! Configuration for locating and rendering the options call.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading a [`ChunkOptionsConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    /// The config file could not be read.
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    /// The config text is not valid JSON for this schema.
    Json(#[from] serde_json::Error),

    #[error("config field `{0}` must not be empty")]
    /// A required text field was empty.
    EmptyField(&'static str),
}

/// Settings shared by the locator, the synthesizer and chunk discovery.
///
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkOptionsConfig {
    /// Namespace qualifier accepted before the call and emitted on rewrite.
    pub namespace: String,
    /// Object whose method is called.
    pub object: String,
    /// Method name.
    pub method: String,
    /// Indent unit for multi-line output.
    pub indent_unit: String,
    /// Largest entry count rendered on a single line.
    pub single_line_max: usize,
    /// Row text that closes a chunk; tokenizers built from this config emit it as the boundary.
    pub chunk_end_fence: String,
}

impl Default for ChunkOptionsConfig {
    fn default() -> Self {
        Self {
            namespace: "knitr".to_string(),
            object: "opts_chunk".to_string(),
            method: "set".to_string(),
            indent_unit: "\t".to_string(),
            single_line_max: 2,
            chunk_end_fence: "```".to_string(),
        }
    }
}

impl ChunkOptionsConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check that all identifiers and the indent unit are non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let identifiers = [
            ("namespace", &self.namespace),
            ("object", &self.object),
            ("method", &self.method),
            ("chunk_end_fence", &self.chunk_end_fence),
        ];
        for (name, value) in identifiers {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }
        // Indent units are whitespace: only the empty string is invalid.
        if self.indent_unit.is_empty() {
            return Err(ConfigError::EmptyField("indent_unit"));
        }
        Ok(())
    }

    /// The call pattern the locator searches for.
    pub fn call_syntax(&self) -> CallSyntax {
        CallSyntax {
            namespace: self.namespace.clone(),
            object: self.object.clone(),
            method: self.method.clone(),
        }
    }
}

/// Shape of the options call: `[namespace::]object$method(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSyntax {
    /// Optional qualifier (`knitr`).
    pub namespace: String,
    /// Anchor identifier (`opts_chunk`).
    pub object: String,
    /// Method after `$` (`set`).
    pub method: String,
}

impl CallSyntax {
    /// Fully qualified call head, e.g. `knitr::opts_chunk$set`.
    pub fn qualified_head(&self) -> String {
        format!("{}::{}${}", self.namespace, self.object, self.method)
    }
}

impl Default for CallSyntax {
    fn default() -> Self {
        ChunkOptionsConfig::default().call_syntax()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ChunkOptionsConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ChunkOptionsConfig::default());
        assert_eq!(
            config.call_syntax().qualified_head(),
            "knitr::opts_chunk$set"
        );
    }

    #[test]
    fn test_partial_override() {
        let config =
            ChunkOptionsConfig::from_json_str(r#"{"indent_unit": "  ", "single_line_max": 0}"#)
                .unwrap();
        assert_eq!(config.indent_unit, "  ");
        assert_eq!(config.single_line_max, 0);
        assert_eq!(config.namespace, "knitr");
    }

    #[test]
    fn test_rejects_empty_fields() {
        let err = ChunkOptionsConfig::from_json_str(r#"{"object": " "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField("object")));

        let err = ChunkOptionsConfig::from_json_str(r#"{"indent_unit": ""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField("indent_unit")));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = ChunkOptionsConfig::from_json_str(r#"{"single_line_max": "two"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"namespace": "knitr", "chunk_end_fence": "~~~"}}"#).unwrap();
        let config = ChunkOptionsConfig::load(file.path()).unwrap();
        assert_eq!(config.chunk_end_fence, "~~~");

        let missing = ChunkOptionsConfig::load(Path::new("/nonexistent/chunk-opts.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}

//! Code synthesizer.
//!
//! Renders an [`OptionMap`] as replacement source for the options call:
//!
//! - no entries: empty string (deletes an existing call)
//! - up to `single_line_max` entries: one line, insertion order
//! - more: one entry per indented line, sorted by key
//!
//! Values are written verbatim, without quoting.

use crate::config::ChunkOptionsConfig;
use crate::options::OptionMap;

/// Renders option maps into `ns::object$method(...)` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSynthesizer {
    head: String,
    indent_unit: String,
    single_line_max: usize,
}

impl CodeSynthesizer {
    /// Build from a config.
    pub fn new(config: &ChunkOptionsConfig) -> Self {
        Self {
            head: config.call_syntax().qualified_head(),
            indent_unit: config.indent_unit.clone(),
            single_line_max: config.single_line_max,
        }
    }

    /// Render `options`; output is empty or ends with `'\n'`.
    pub fn render(&self, options: &OptionMap) -> String {
        if options.is_empty() {
            return String::new();
        }

        if options.len() <= self.single_line_max {
            let joined = join_entries(options, ", ");
            return format!("{}({})\n", self.head, joined);
        }

        let separator = format!(",\n{}", self.indent_unit);
        let joined = join_entries(&options.sorted(), &separator);
        format!("{}(\n{}{}\n)\n", self.head, self.indent_unit, joined)
    }
}

impl Default for CodeSynthesizer {
    fn default() -> Self {
        Self::new(&ChunkOptionsConfig::default())
    }
}

fn join_entries(options: &OptionMap, separator: &str) -> String {
    options
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect::<Vec<_>>()
        .join(separator)
}

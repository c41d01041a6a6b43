//! Public output types for migration results.
//!
//! These are returned by the library and serialized by the CLI.

use serde::Serialize;
use std::path::PathBuf;

/// Outcome for one target document that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpdate {
    pub path: PathBuf,
    /// Occurrences replaced across all rules.
    pub replacements: usize,
    /// Whether the written text differs from what was read.
    pub changed: bool,
}

/// Summary of a completed migration pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    pub rules: usize,
    pub files: Vec<FileUpdate>,
    pub total_replacements: usize,
}

impl MigrationSummary {
    pub fn record(&mut self, update: FileUpdate) {
        self.total_replacements += update.replacements;
        self.files.push(update);
    }
}

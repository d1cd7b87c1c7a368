use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics about an indexing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of files chunked successfully
    pub files: usize,

    /// Number of files skipped because of an error
    pub failed_files: usize,

    /// Number of chunks written to the sink
    pub chunks: usize,

    /// Total lines of the successful files
    pub total_lines: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Successful files per language
    pub languages: BTreeMap<String, usize>,

    /// Failed files per error kind
    pub error_kinds: BTreeMap<String, usize>,

    /// Errors encountered
    pub errors: Vec<String>,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, language: &str, lines: usize) {
        self.files += 1;
        self.total_lines += lines;
        *self.languages.entry(language.to_string()).or_insert(0) += 1;
    }

    pub fn add_chunks(&mut self, count: usize) {
        self.chunks += count;
    }

    pub fn add_error(&mut self, kind: &str, error: String) {
        self.failed_files += 1;
        *self.error_kinds.entry(kind.to_string()).or_insert(0) += 1;
        self.errors.push(error);
    }

    /// Files the run looked at, successful or not
    pub fn scanned(&self) -> usize {
        self.files + self.failed_files
    }
}

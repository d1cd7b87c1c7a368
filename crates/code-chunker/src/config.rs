use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default line budget for a single chunk
pub const DEFAULT_MAX_CHUNK_LINES: usize = 80;

/// Configuration for code chunking behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Maximum number of lines in one chunk before it is sub-split
    pub max_chunk_lines: usize,

    /// Root that chunk `file_path`s are made relative to
    pub project_root: PathBuf,

    /// What to do when a grammar parser reports syntax errors
    pub parse_error_policy: ParseErrorPolicy,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chunk_lines: DEFAULT_MAX_CHUNK_LINES,
            project_root: PathBuf::from("."),
            parse_error_policy: ParseErrorPolicy::Fail,
        }
    }
}

impl ChunkerConfig {
    /// Default config rooted at `root`
    pub fn with_project_root(root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: root.into(),
            ..Default::default()
        }
    }

    /// Smaller chunks for embedding models with short context windows
    #[must_use]
    pub fn for_embeddings() -> Self {
        Self {
            max_chunk_lines: 40,
            ..Default::default()
        }
    }

    /// Keep going on files the grammar cannot fully parse
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            parse_error_policy: ParseErrorPolicy::TextualFallback,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_lines == 0 {
            return Err("max_chunk_lines must be > 0".to_string());
        }

        if self.project_root.as_os_str().is_empty() {
            return Err("project_root must not be empty".to_string());
        }

        Ok(())
    }
}

/// Behavior when a tree-sitter parse contains error nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorPolicy {
    /// Report a `ParseFailure` and skip the file
    #[default]
    Fail,

    /// Re-read the file with the delimiter-scanning backend when the language
    /// has one; languages without braces still fail
    TextualFallback,
}

use serde::{Deserialize, Serialize};

/// A line-addressed fragment of one source file.
///
/// Serializes to the record consumed by indexing and storage:
/// `type, name, part_index, start_line, end_line, file_path, source`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeChunk {
    /// Structural role of the fragment
    #[serde(rename = "type")]
    pub kind: ChunkKind,

    /// Declaration name, `None` for anonymous fragments
    pub name: Option<String>,

    /// 1-based position among the sub-splits of one logical unit
    pub part_index: usize,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// Path relative to the project root
    pub file_path: String,

    /// Exact text of the covered lines
    pub source: String,
}

impl CodeChunk {
    /// Create a new code chunk
    #[must_use]
    pub const fn new(
        kind: ChunkKind,
        name: Option<String>,
        part_index: usize,
        start_line: usize,
        end_line: usize,
        file_path: String,
        source: String,
    ) -> Self {
        Self {
            kind,
            name,
            part_index,
            start_line,
            end_line,
            file_path,
            source,
        }
    }

    /// Build a single-part chunk covering `start_line..=end_line` of `file`
    #[must_use]
    pub fn from_file_range(
        file: &SourceFile<'_>,
        kind: ChunkKind,
        name: Option<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        Self::new(
            kind,
            name,
            1,
            start_line,
            end_line,
            file.path.to_string(),
            file.line_range(start_line, end_line).join("\n"),
        )
    }

    /// Get the number of lines in this chunk
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Check if chunk contains a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Fold `other` into this chunk: its text is appended on a new line and
    /// the range grows to cover it.
    pub fn absorb(&mut self, other: Self) {
        self.source.push('\n');
        self.source.push_str(&other.source);
        self.end_line = self.end_line.max(other.end_line);
    }
}

/// Structural role of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// Class, interface, enum, struct, trait, impl, module
    DeclarationContainer,
    /// Method or function
    Member,
    /// Terminator-delimited script statement
    Statement,
    /// Region of a template or markup file
    TemplateRegion,
    /// File-level documentation
    DocComment,
    Unknown,
}

impl ChunkKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeclarationContainer => "declaration_container",
            Self::Member => "member",
            Self::Statement => "statement",
            Self::TemplateRegion => "template_region",
            Self::DocComment => "doc_comment",
            Self::Unknown => "unknown",
        }
    }
}

/// One file as seen by a strategy: its root-relative path, full text and
/// line view. Lines are split the way `str::lines` does, so line `n` is
/// `lines[n - 1]`.
#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    pub path: &'a str,
    pub text: &'a str,
    pub lines: Vec<&'a str>,
}

impl<'a> SourceFile<'a> {
    #[must_use]
    pub fn new(path: &'a str, text: &'a str) -> Self {
        Self {
            path,
            text,
            lines: text.lines().collect(),
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines `start..=end` (1-based), clamped to the file
    #[must_use]
    pub fn line_range(&self, start: usize, end: usize) -> &[&'a str] {
        let len = self.lines.len();
        let lo = start.saturating_sub(1).min(len);
        let hi = end.min(len).max(lo);
        &self.lines[lo..hi]
    }
}

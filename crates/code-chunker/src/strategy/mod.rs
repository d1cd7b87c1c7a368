//! Per-language chunk discovery.
//!
//! A strategy turns one file into its ordered candidate chunks. Strategies
//! are built once, hold only read-only resources, and are shared across
//! files and threads.

mod boundary;
mod statement;
mod structural;

pub use boundary::BoundaryStrategy;
pub use statement::StatementStrategy;
pub use structural::StructuralStrategy;

use crate::error::Result;
use crate::language::Language;
use crate::splitter::{split_unit, SoftBreak};
use crate::types::{ChunkKind, CodeChunk, SourceFile};

/// Candidate-chunk extraction for one kind of file
pub trait ChunkStrategy: Send + Sync {
    /// Language handled by this strategy
    fn language(&self) -> Language;

    /// Produce candidate chunks in discovery order
    fn extract(&self, file: &SourceFile<'_>) -> Result<Vec<CodeChunk>>;
}

/// Emit one logical unit covering `start_line..=end_line` of `file`,
/// sub-splitting it when it is longer than `budget` lines.
pub(crate) fn emit_unit(
    file: &SourceFile<'_>,
    kind: ChunkKind,
    name: Option<String>,
    (start_line, end_line): (usize, usize),
    budget: usize,
    soft_break: SoftBreak<'_>,
) -> Vec<CodeChunk> {
    let lines = file.line_range(start_line, end_line);
    if lines.is_empty() {
        return Vec::new();
    }

    if lines.len() <= budget {
        return vec![CodeChunk::from_file_range(
            file, kind, name, start_line, end_line,
        )];
    }

    split_unit(lines, start_line, budget, soft_break)
        .into_iter()
        .map(|span| span.into_chunk(kind, name.clone(), file.path))
        .collect()
}

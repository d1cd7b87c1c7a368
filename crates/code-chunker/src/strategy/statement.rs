use super::ChunkStrategy;
use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::splitter::{split_unit, SoftBreak};
use crate::types::{ChunkKind, CodeChunk, SourceFile};
use regex::Regex;

/// Statement terminator followed by a line break
const TERMINATOR_PATTERN: &str = r";\s*\n";

/// Splits scripts into terminator-delimited statements.
pub struct StatementStrategy {
    terminator: Regex,
    max_chunk_lines: usize,
}

impl StatementStrategy {
    pub fn new(config: &ChunkerConfig) -> Result<Self> {
        let terminator = Regex::new(TERMINATOR_PATTERN)
            .map_err(|e| ChunkerError::invalid_config(format!("bad terminator pattern: {e}")))?;

        Ok(Self {
            terminator,
            max_chunk_lines: config.max_chunk_lines,
        })
    }

    /// Raw statement slices with their byte offsets; the `;` stays with the
    /// statement, the whitespace after it does not
    fn statements<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)> {
        let mut out = Vec::new();
        let mut from = 0;

        for m in self.terminator.find_iter(text) {
            let end = m.start() + 1;
            out.push((from, &text[from..end]));
            from = m.end();
        }
        if from < text.len() {
            out.push((from, &text[from..]));
        }

        out
    }

    fn emit(&self, file: &SourceFile<'_>, statement: &str, start_line: usize) -> Vec<CodeChunk> {
        let lines: Vec<&str> = statement.split('\n').collect();

        if lines.len() <= self.max_chunk_lines {
            return vec![CodeChunk::new(
                ChunkKind::Statement,
                None,
                1,
                start_line,
                start_line + lines.len() - 1,
                file.path.to_string(),
                statement.to_string(),
            )];
        }

        let soft_break = SoftBreak::new(Language::Sql.line_comment_markers());
        split_unit(&lines, start_line, self.max_chunk_lines, soft_break)
            .into_iter()
            .map(|span| {
                let name = format!("statement_part_{}", span.part_index);
                span.into_chunk(ChunkKind::Statement, Some(name), file.path)
            })
            .collect()
    }
}

impl ChunkStrategy for StatementStrategy {
    fn language(&self) -> Language {
        Language::Sql
    }

    fn extract(&self, file: &SourceFile<'_>) -> Result<Vec<CodeChunk>> {
        let text = file.text;
        let mut chunks = Vec::new();
        // newlines seen in text[..counted]
        let mut counted = 0;
        let mut newlines = 0;

        for (offset, raw) in self.statements(text) {
            let statement = raw.trim();
            if statement.is_empty() {
                continue;
            }

            let begin = offset + (raw.len() - raw.trim_start().len());
            newlines += text[counted..begin].matches('\n').count();
            counted = begin;

            chunks.extend(self.emit(file, statement, newlines + 1));
        }

        Ok(chunks)
    }
}

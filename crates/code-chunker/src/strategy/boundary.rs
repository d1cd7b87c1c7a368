use super::{emit_unit, ChunkStrategy};
use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::splitter::SoftBreak;
use crate::types::{ChunkKind, CodeChunk, SourceFile};
use regex::Regex;

/// Directive, tag-library element, embedded script/style or comment opener
const REGION_OPEN_PATTERN: &str = r"(?i)^\s*<(%|jsp:|[A-Za-z][\w-]*:|script\b|style\b|!--)";

/// Region-based strategy for templates and markup.
///
/// Every line lands in exactly one region, so the regions tile the file.
pub struct BoundaryStrategy {
    region_open: Regex,
    max_chunk_lines: usize,
}

impl BoundaryStrategy {
    pub fn new(config: &ChunkerConfig) -> Result<Self> {
        let region_open = Regex::new(REGION_OPEN_PATTERN)
            .map_err(|e| ChunkerError::invalid_config(format!("bad region pattern: {e}")))?;

        Ok(Self {
            region_open,
            max_chunk_lines: config.max_chunk_lines,
        })
    }

    fn starts_region(&self, prev: Option<&str>, line: &str) -> bool {
        let double_blank = line.trim().is_empty() && prev.is_some_and(|p| p.trim().is_empty());
        double_blank || self.region_open.is_match(line)
    }

    /// Inclusive 1-based line ranges of the regions
    fn regions(&self, lines: &[&str]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut start = 1;
        let mut prev: Option<&str> = None;

        for (idx, &line) in lines.iter().enumerate() {
            let line_no = idx + 1;
            if line_no > start && self.starts_region(prev, line) {
                regions.push((start, line_no - 1));
                start = line_no;
            }
            prev = Some(line);
        }

        if !lines.is_empty() {
            regions.push((start, lines.len()));
        }

        regions
    }
}

impl ChunkStrategy for BoundaryStrategy {
    fn language(&self) -> Language {
        Language::Markup
    }

    fn extract(&self, file: &SourceFile<'_>) -> Result<Vec<CodeChunk>> {
        let soft_break = SoftBreak::new(Language::Markup.line_comment_markers());

        Ok(self
            .regions(&file.lines)
            .into_iter()
            .flat_map(|range| {
                emit_unit(
                    file,
                    ChunkKind::TemplateRegion,
                    None,
                    range,
                    self.max_chunk_lines,
                    soft_break,
                )
            })
            .collect())
    }
}

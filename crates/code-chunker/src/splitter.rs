//! Line-budget splitting of oversized units.

use crate::types::{ChunkKind, CodeChunk};

/// One contiguous piece of an oversized unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpan {
    /// 1-based sequence number among the unit's pieces
    pub part_index: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

impl LineSpan {
    /// Turn the span into a chunk of the given unit
    pub fn into_chunk(self, kind: ChunkKind, name: Option<String>, file_path: &str) -> CodeChunk {
        CodeChunk::new(
            kind,
            name,
            self.part_index,
            self.start_line,
            self.end_line,
            file_path.to_string(),
            self.text,
        )
    }
}

/// Lines preferred as split points: blank lines and lines led by one of the
/// language's line-comment markers.
#[derive(Debug, Clone, Copy)]
pub struct SoftBreak<'a> {
    comment_markers: &'a [&'a str],
}

impl<'a> SoftBreak<'a> {
    pub const fn new(comment_markers: &'a [&'a str]) -> Self {
        Self { comment_markers }
    }

    pub fn is_break(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty()
            || self
                .comment_markers
                .iter()
                .any(|marker| trimmed.starts_with(marker))
    }
}

/// Partition `lines` (starting at file line `start_line`) into pieces of at
/// most `budget` lines, closing early on soft breaks.
///
/// A piece closes on the line that fills the budget or on a soft-break line,
/// whichever comes first; when both happen on the same line the piece simply
/// closes there. No piece exceeds `budget`, and blank-only pieces are never
/// emitted: a blank run is appended to the previous piece while that piece
/// stays within the budget, or carried into the next piece while the run is
/// shorter than the budget, and dropped otherwise. Unless a run was dropped,
/// joining the texts with `\n` reproduces the input.
pub fn split_unit(
    lines: &[&str],
    start_line: usize,
    budget: usize,
    soft_break: SoftBreak<'_>,
) -> Vec<LineSpan> {
    let budget = budget.max(1);
    let mut spans: Vec<LineSpan> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut buffer_start = start_line;

    for (offset, &line) in lines.iter().enumerate() {
        buffer.push(line);

        if buffer.len() >= budget || soft_break.is_break(line) {
            let line_no = start_line + offset;
            if close_piece(&mut spans, &mut buffer, buffer_start, line_no, budget, false) {
                buffer_start = line_no + 1;
            }
        }
    }

    if !buffer.is_empty() {
        let last_line = start_line + lines.len() - 1;
        close_piece(&mut spans, &mut buffer, buffer_start, last_line, budget, true);
    }

    spans
}

/// Close the buffered lines; returns whether the buffer was consumed
fn close_piece(
    spans: &mut Vec<LineSpan>,
    buffer: &mut Vec<&str>,
    buffer_start: usize,
    end_line: usize,
    budget: usize,
    at_end: bool,
) -> bool {
    let text = buffer.join("\n");

    if text.trim().is_empty() {
        if let Some(prev) = spans.last_mut() {
            let prev_len = prev.end_line - prev.start_line + 1;
            if prev_len + buffer.len() <= budget {
                prev.text.push('\n');
                prev.text.push_str(&text);
                prev.end_line = end_line;
                buffer.clear();
                return true;
            }
        }
        if buffer.len() < budget && !at_end {
            return false;
        }
        buffer.clear();
        return true;
    }

    spans.push(LineSpan {
        part_index: spans.len() + 1,
        start_line: buffer_start,
        end_line,
        text,
    });
    buffer.clear();
    true
}

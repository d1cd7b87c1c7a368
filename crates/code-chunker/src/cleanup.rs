//! Removal and merging of structurally meaningless chunks.

use crate::language::{is_comment, Language};
use crate::types::{ChunkKind, CodeChunk};

/// Texts that carry no content on their own
const DELIMITERS: &[&str] = &[
    "{", "}", "};", "})", "});", "(", ")", ");", "[", "]", "];", ";", "%>", "-->",
];

/// Chunks with fewer code lines than this are merged away
const MIN_CODE_LINES: usize = 3;

/// Comment-only chunks up to this many lines are dropped
const MAX_DROPPED_COMMENT_LINES: usize = 2;

/// Classification of a candidate chunk, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkClass {
    Empty,
    DelimiterOnly,
    CommentOnly,
    Tiny,
    Normal,
}

impl ChunkClass {
    /// Whether the chunk is folded into the previous retained chunk
    pub const fn merges(self) -> bool {
        matches!(self, Self::DelimiterOnly | Self::Tiny)
    }

    /// Whether the chunk is discarded outright
    pub const fn drops(self) -> bool {
        matches!(self, Self::Empty | Self::CommentOnly)
    }
}

/// Classify chunk text; total over any input
pub fn classify(source: &str, comment_prefixes: &[&str]) -> ChunkClass {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return ChunkClass::Empty;
    }
    if DELIMITERS.contains(&trimmed) {
        return ChunkClass::DelimiterOnly;
    }

    let mut comment_lines = 0;
    let mut code_lines = 0;
    for line in source.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_comment(line, comment_prefixes) {
            comment_lines += 1;
        } else {
            code_lines += 1;
        }
    }

    if code_lines == 0 && comment_lines <= MAX_DROPPED_COMMENT_LINES {
        ChunkClass::CommentOnly
    } else if code_lines < MIN_CODE_LINES {
        ChunkClass::Tiny
    } else {
        ChunkClass::Normal
    }
}

/// Unsplit statements and module documentation are complete units; they are
/// never folded away for being short
fn is_atomic(chunk: &CodeChunk) -> bool {
    match chunk.kind {
        ChunkKind::DocComment => true,
        ChunkKind::Statement => chunk.part_index == 1 && chunk.name.is_none(),
        _ => false,
    }
}

/// Drop empty and comment-only chunks; fold delimiter-only and tiny chunks
/// into the preceding retained chunk, or drop them when there is none.
///
/// Every retained chunk is `Normal` or a short atomic unit, so running this
/// again changes nothing.
pub fn cleanup(chunks: Vec<CodeChunk>, language: Language) -> Vec<CodeChunk> {
    let prefixes = language.comment_prefixes();
    let total = chunks.len();
    let mut kept: Vec<CodeChunk> = Vec::with_capacity(total);
    let mut merged = 0usize;

    for chunk in chunks {
        let class = match classify(&chunk.source, prefixes) {
            ChunkClass::Tiny if is_atomic(&chunk) => ChunkClass::Normal,
            class => class,
        };
        if class.drops() {
            continue;
        }
        if class.merges() {
            if let Some(prev) = kept.last_mut() {
                prev.absorb(chunk);
                merged += 1;
            }
            continue;
        }
        kept.push(chunk);
    }

    log::trace!(
        "cleanup: {total} candidates, {} kept, {merged} merged",
        kept.len()
    );
    kept
}

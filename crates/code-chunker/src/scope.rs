//! Scope location: where does a declaration's body end?

/// Paired delimiters used by the textual scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
    /// Ends a body-less declaration (`void f();`)
    pub terminator: Option<char>,
}

impl Delimiters {
    pub const BRACES: Self = Self {
        open: '{',
        close: '}',
        terminator: Some(';'),
    };
}

/// End line (1-based, inclusive) of the scope opened at `start_line`.
///
/// `known_end` is the parser's own span end; when present it wins and no
/// scanning happens. Otherwise the lines are scanned for `delimiters`, and
/// `next_declaration` (the first line of the following declaration) bounds
/// a declaration whose body never opens.
pub fn locate_scope_end(
    start_line: usize,
    known_end: Option<usize>,
    next_declaration: Option<usize>,
    lines: &[&str],
    delimiters: Delimiters,
) -> usize {
    match known_end {
        Some(end) => end.max(start_line),
        None => scan_scope_end(start_line, next_declaration, lines, delimiters),
    }
}

/// Delimiter-depth scan starting at `start_line`.
///
/// The scope counts as entered once depth first turns positive and ends on
/// the first later line where it is back to zero. Reaching the end of the
/// file first yields the last line. Before the scope is entered, a line
/// ending in the terminator closes the declaration on that line, while a
/// blank line or the start of `next_declaration` closes it on the line above.
pub fn scan_scope_end(
    start_line: usize,
    next_declaration: Option<usize>,
    lines: &[&str],
    delimiters: Delimiters,
) -> usize {
    let total = lines.len();
    if start_line == 0 || start_line > total {
        return start_line.max(1);
    }

    let mut depth: i64 = 0;
    let mut entered = false;

    for (idx, line) in lines.iter().enumerate().skip(start_line - 1) {
        let line_no = idx + 1;
        let reached_next = next_declaration.is_some_and(|next| line_no >= next);
        if !entered && line_no > start_line && reached_next {
            return idx;
        }

        for ch in line.chars() {
            if ch == delimiters.open {
                depth += 1;
                entered = true;
            } else if ch == delimiters.close {
                depth -= 1;
            }
        }

        if entered && depth <= 0 {
            return line_no;
        }

        if !entered {
            if line_no > start_line && line.trim().is_empty() {
                return idx;
            }
            if let Some(term) = delimiters.terminator {
                if line.trim_end().ends_with(term) {
                    return line_no;
                }
            }
        }
    }

    if entered {
        total
    } else {
        start_line
    }
}

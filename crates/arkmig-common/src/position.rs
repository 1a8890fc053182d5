//! Position and span utilities.
//!
//! Source trees carry byte spans into the original Java text (used for
//! verbatim passthrough) and 1-based line/column positions (used for
//! diagnostics). `LineMap` converts between the two.

use serde::{Deserialize, Serialize};

/// A position in a source file (1-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number
    pub line: u32,
    /// 1-based column, counted in chars
    pub column: u32,
}

impl Position {
    /// Position used for synthesized nodes with no source location.
    pub const UNKNOWN: Position = Position { line: 0, column: 0 };

    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub const fn is_unknown(self) -> bool {
        self.line == 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::UNKNOWN
    }
}

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Slice the span out of `text`, or `None` if it is empty or out of range.
    pub fn slice(self, text: &str) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        text.get(self.start as usize..self.end as usize)
    }
}

/// A file-qualified location, the shape diagnostics are reported with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, position: Position) -> Self {
        SourceLocation {
            file: file.into(),
            line: position.line,
            column: position.column,
        }
    }
}

/// Line map for offset <-> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];

        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push((i + 1) as u32);
            } else if ch == '\r' {
                let next_idx = i + 1;
                // \r\n: the \n creates the line start
                if source.as_bytes().get(next_idx) != Some(&b'\n') {
                    line_starts.push(next_idx as u32);
                }
            }
        }

        LineMap { line_starts }
    }

    /// Convert a byte offset to a 1-based `Position`.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");
        let column = slice.chars().count() as u32;

        Position::new(line as u32 + 1, column + 1)
    }

    /// Convert a 1-based `Position` back to a byte offset.
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        if position.is_unknown() {
            return None;
        }
        let line_idx = (position.line - 1) as usize;
        let line_start = *self.line_starts.get(line_idx)?;
        let rest = source.get(line_start as usize..)?;
        let mut offset = line_start;
        for (seen, ch) in rest.chars().enumerate() {
            if seen as u32 + 1 == position.column || ch == '\n' || ch == '\r' {
                break;
            }
            offset += ch.len_utf8() as u32;
        }
        Some(offset)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }
}

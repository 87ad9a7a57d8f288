//! Source location tracking for lexer/parser diagnostics.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A location in the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub offset: u32,
}

impl Position {
    pub const fn new(offset: u32) -> Self {
        Self { offset }
    }

    pub const fn start() -> Self {
        Self { offset: 0 }
    }
}

/// A span in the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub const fn single(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn range(&self) -> Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: if self.start < other.start { self.start } else { other.start },
            end: if self.end > other.end { self.end } else { other.end },
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(r: Range<usize>) -> Self {
        Self::new(Position::new(r.start as u32), Position::new(r.end as u32))
    }
}

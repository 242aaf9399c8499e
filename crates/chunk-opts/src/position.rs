//! Document coordinates.
//!
//! All positions are zero-based and measured in characters (Unicode scalar values), matching
//! the rope-backed [`LineIndex`](crate::LineIndex).

use std::cmp::Ordering;
use std::fmt;

/// Position coordinates (row and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical row index.
    pub row: usize,
    /// Zero-based column in characters within the row.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Column 0 of the row after this one.
    pub fn start_of_next_row(self) -> Self {
        Self::new(self.row + 1, 0)
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A half-open document range (`start..end`).
///
/// Constructors keep `start <= end`; an empty range is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// Inclusive start position.
    pub start: Position,
    /// Exclusive end position.
    pub end: Position,
}

impl Range {
    /// Create a range from two points in either order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// An empty range at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns `true` if the range selects nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// An active selection: an anchor and an active end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection was started.
    pub anchor: Position,
    /// Where the caret sits.
    pub active: Position,
}

impl Selection {
    /// A forward selection covering `range`.
    pub fn from_range(range: Range) -> Self {
        Self {
            anchor: range.start,
            active: range.end,
        }
    }

    /// The normalized range covered by this selection.
    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering_is_row_major() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(
            Position::new(3, 7).start_of_next_row(),
            Position::new(4, 0)
        );
    }

    #[test]
    fn test_range_normalizes_endpoints() {
        let range = Range::new(Position::new(4, 2), Position::new(1, 0));
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(4, 2));
        assert!(!range.is_empty());
        assert!(Range::caret(Position::new(1, 1)).is_empty());
    }

    #[test]
    fn test_backward_selection_range() {
        let sel = Selection {
            anchor: Position::new(2, 5),
            active: Position::new(0, 1),
        };
        assert_eq!(
            sel.range(),
            Range::new(Position::new(0, 1), Position::new(2, 5))
        );
    }
}

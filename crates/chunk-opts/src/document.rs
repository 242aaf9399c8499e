//! Editor surface
//!
//! [`EditorSurface`] is the narrow document interface the options panel needs: read rows,
//! drive the selection/caret, and write text over a range. [`ChunkDocument`] is the
//! in-memory implementation used by the lexer, the CLI and tests; editor hosts implement the
//! trait over their own buffers.

use crate::line_ending::{LineEnding, normalize_to_lf};
use crate::line_index::LineIndex;
use crate::position::{Position, Range, Selection};

/// Document operations consumed by the option-block engine.
pub trait EditorSurface {
    /// Drop any selection, leaving the caret where it is.
    fn clear_selection(&mut self);

    /// Move the caret (clamped to the document). Clears the selection.
    fn move_caret_to(&mut self, pos: Position);

    /// Replace the active selection with `range`.
    fn set_selection(&mut self, range: Range);

    /// The active selection, or an empty range at the caret.
    fn selection_range(&self) -> Range;

    /// Replace `range` with `text`. An empty range inserts at that point.
    fn insert_text(&mut self, range: Range, text: &str);

    /// Text of `row` without its newline.
    fn line(&self, row: usize) -> Option<String>;

    /// Number of rows.
    fn line_count(&self) -> usize;

    /// Whole document text, rows joined by `'\n'`.
    fn text(&self) -> String {
        (0..self.line_count())
            .filter_map(|row| self.line(row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A rope-backed document with a single caret and optional selection.
///
/// # Example
///
/// ```rust
/// use chunk_opts::{ChunkDocument, EditorSurface, Position, Range};
///
/// let mut doc = ChunkDocument::new("a <- 1\nb <- 2\n");
/// doc.insert_text(Range::new(Position::new(1, 0), Position::new(1, 1)), "bb");
/// assert_eq!(doc.text(), "a <- 1\nbb <- 2\n");
/// assert_eq!(doc.caret(), Position::new(1, 2));
/// ```
#[derive(Debug, Clone)]
pub struct ChunkDocument {
    line_index: LineIndex,
    caret: Position,
    selection: Option<Selection>,
    line_ending: LineEnding,
}

impl ChunkDocument {
    /// Load `text`, normalizing newlines to LF.
    pub fn new(text: &str) -> Self {
        Self {
            line_index: LineIndex::from_text(&normalize_to_lf(text)),
            caret: Position::default(),
            selection: None,
            line_ending: LineEnding::detect_in_text(text),
        }
    }

    /// Caret position.
    pub fn caret(&self) -> Position {
        self.caret
    }

    /// Active selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Text converted back to the detected line ending.
    pub fn text_for_saving(&self) -> String {
        self.line_ending.apply_to_text(&self.line_index.text())
    }
}

impl EditorSurface for ChunkDocument {
    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn move_caret_to(&mut self, pos: Position) {
        self.selection = None;
        self.caret = self.line_index.clamp(pos);
    }

    fn set_selection(&mut self, range: Range) {
        let range = Range::new(
            self.line_index.clamp(range.start),
            self.line_index.clamp(range.end),
        );
        self.caret = range.end;
        self.selection = Some(Selection::from_range(range));
    }

    fn selection_range(&self) -> Range {
        self.selection
            .map(|sel| sel.range())
            .unwrap_or_else(|| Range::caret(self.caret))
    }

    fn insert_text(&mut self, range: Range, text: &str) {
        let text = normalize_to_lf(text);
        let start = self.line_index.position_to_char_offset(range.start);
        let end = self.line_index.position_to_char_offset(range.end);

        self.line_index.delete(start, end.saturating_sub(start));
        self.line_index.insert(start, &text);

        self.selection = None;
        self.caret = self
            .line_index
            .char_offset_to_position(start + text.chars().count());
    }

    fn line(&self, row: usize) -> Option<String> {
        self.line_index.line_text(row)
    }

    fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    fn text(&self) -> String {
        self.line_index.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_clamped() {
        let mut doc = ChunkDocument::new("abc\nde");
        doc.set_selection(Range::new(Position::new(0, 1), Position::new(5, 5)));
        assert_eq!(
            doc.selection_range(),
            Range::new(Position::new(0, 1), Position::new(1, 2))
        );
    }

    #[test]
    fn test_move_caret_clears_selection() {
        let mut doc = ChunkDocument::new("abc\nde");
        doc.set_selection(Range::new(Position::new(0, 0), Position::new(0, 2)));
        doc.move_caret_to(Position::new(1, 0));
        assert!(doc.selection().is_none());
        assert_eq!(doc.selection_range(), Range::caret(Position::new(1, 0)));
    }

    #[test]
    fn test_insert_over_range_moves_caret_after_text() {
        let mut doc = ChunkDocument::new("one\ntwo\nthree");
        doc.insert_text(
            Range::new(Position::new(0, 3), Position::new(2, 0)),
            "\nX\n",
        );
        assert_eq!(doc.text(), "one\nX\nthree");
        assert_eq!(doc.caret(), Position::new(2, 0));
    }

    #[test]
    fn test_crlf_round_trip() {
        let mut doc = ChunkDocument::new("a\r\nb\r\n");
        assert_eq!(doc.text(), "a\nb\n");
        doc.insert_text(Range::caret(Position::new(1, 1)), "!\r\n");
        assert_eq!(doc.text_for_saving(), "a\r\nb!\r\n\r\n");
    }

    #[test]
    fn test_default_text_joins_rows() {
        struct Rows(Vec<&'static str>);
        impl EditorSurface for Rows {
            fn clear_selection(&mut self) {}
            fn move_caret_to(&mut self, _pos: Position) {}
            fn set_selection(&mut self, _range: Range) {}
            fn selection_range(&self) -> Range {
                Range::default()
            }
            fn insert_text(&mut self, _range: Range, _text: &str) {}
            fn line(&self, row: usize) -> Option<String> {
                self.0.get(row).map(|s| s.to_string())
            }
            fn line_count(&self) -> usize {
                self.0.len()
            }
        }

        assert_eq!(Rows(vec!["a", "", "b"]).text(), "a\n\nb");
    }
}

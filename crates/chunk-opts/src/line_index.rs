//! Logical line index
//!
//! Rope-backed storage for document text with O(log N) row access and character-offset
//! conversion.

use crate::position::Position;
use ropey::Rope;

/// Logical line index - implemented using the Rope data structure
///
/// Text is stored LF-normalized; see [`LineEnding`](crate::LineEnding) for round-tripping CRLF.
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index (one empty row).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total row count (`N` newlines => `N + 1` rows)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Character length of `row`, excluding the newline.
    pub fn line_len(&self, row: usize) -> usize {
        if row >= self.rope.len_lines() {
            return 0;
        }

        let start = self.rope.line_to_char(row);
        if row + 1 < self.rope.len_lines() {
            self.rope.line_to_char(row + 1) - start - 1 // -1 for newline
        } else {
            self.rope.len_chars() - start
        }
    }

    /// Get text of the specified row (excluding newline)
    pub fn line_text(&self, row: usize) -> Option<String> {
        if row >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(row).to_string();
        if text.ends_with('\n') {
            text.pop();
        }

        Some(text)
    }

    /// Clamp `pos` onto an existing row and column.
    pub fn clamp(&self, pos: Position) -> Position {
        let last_row = self.rope.len_lines().saturating_sub(1);
        let row = pos.row.min(last_row);
        Position::new(row, pos.column.min(self.line_len(row)))
    }

    /// Convert a position into a character offset (clamped to the document).
    pub fn position_to_char_offset(&self, pos: Position) -> usize {
        if pos.row >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        self.rope.line_to_char(pos.row) + pos.column.min(self.line_len(pos.row))
    }

    /// Convert a character offset into a position (clamped to the document).
    pub fn char_offset_to_position(&self, char_offset: usize) -> Position {
        let char_offset = char_offset.min(self.rope.len_chars());
        let row = self.rope.char_to_line(char_offset);
        Position::new(row, char_offset - self.rope.line_to_char(row))
    }

    /// Text between two positions.
    pub fn slice(&self, start: Position, end: Position) -> String {
        let start = self.position_to_char_offset(start);
        let end = self.position_to_char_offset(end).max(start);
        self.rope.slice(start..end).to_string()
    }

    /// Insert text at a character offset
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete a character range
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = (start_char + len_chars).min(self.rope.len_chars());

        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }

    /// Get complete text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

//! Selection synchronization and chunk row helpers.

use crate::document::EditorSurface;
use crate::position::{Position, Range};
use crate::token::{SliceCursor, Token, TokenCursor};

/// Point the surface's selection at the edit target and return it.
///
/// With a located call the selection becomes exactly that range. Without one the selection is
/// cleared and the caret moves to [`body_insertion_point`], so insertion always happens at the
/// start of the chunk body.
pub fn sync_selection<S: EditorSurface + ?Sized>(
    surface: &mut S,
    found: Option<Range>,
    chunk_start: Position,
) -> Range {
    match found {
        Some(range) => surface.set_selection(range),
        None => {
            surface.clear_selection();
            surface.move_caret_to(body_insertion_point(surface, chunk_start));
        }
    }
    surface.selection_range()
}

/// Column 0 of the row after the chunk header.
///
/// When the header is the last row there is no body row yet; the point is then the end of the
/// header row and callers must open a row before writing.
pub fn body_insertion_point<S: EditorSurface + ?Sized>(
    surface: &S,
    chunk_start: Position,
) -> Position {
    let body = chunk_start.start_of_next_row();
    if body.row < surface.line_count() {
        return body;
    }
    let len = surface
        .line(chunk_start.row)
        .map_or(0, |line| line.chars().count());
    Position::new(chunk_start.row, len)
}

/// Extend `range` over the line break that follows it, if the range ends its row.
///
/// Rendered calls end with `'\n'`; replacing the call together with its own line break keeps
/// repeated rewrites from stacking blank rows, and an empty rendering removes the row.
pub fn absorb_trailing_line_break<S: EditorSurface + ?Sized>(surface: &S, range: Range) -> Range {
    let end = range.end;
    if end.row + 1 >= surface.line_count() {
        return range;
    }
    let Some(line) = surface.line(end.row) else {
        return range;
    };
    if end.column < line.chars().count() {
        return range;
    }
    Range::new(range.start, end.start_of_next_row())
}

/// Row of the first boundary marker after the chunk header, the same marker the locator
/// stops at.
pub fn find_end_of_chunk(tokens: &[Token], chunk_start: Position) -> Option<usize> {
    let mut cursor = SliceCursor::at(tokens, chunk_start);
    while let Some(token) = cursor.step_forward() {
        if token.is_boundary() {
            return Some(token.start.row);
        }
    }
    None
}

/// Body text of the chunk headed at `header_row`: rows strictly between the header and
/// `end_row` (or the end of the document), joined with `'\n'`.
pub fn chunk_body_text<S: EditorSurface + ?Sized>(
    surface: &S,
    header_row: usize,
    end_row: Option<usize>,
) -> String {
    let end = end_row.unwrap_or(surface.line_count());
    (header_row + 1..end)
        .filter_map(|row| surface.line(row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ChunkDocument;
    use crate::token::TokenKind;

    const DOC: &str = "# Title\n```{r setup}\nlibrary(x)\nknitr::opts_chunk$set(echo = TRUE)\n```\ntext\n";

    #[test]
    fn test_found_range_becomes_selection() {
        let mut doc = ChunkDocument::new(DOC);
        let range = Range::new(Position::new(3, 0), Position::new(3, 34));
        let selected = sync_selection(&mut doc, Some(range), Position::new(1, 0));
        assert_eq!(selected, range);
        assert!(doc.selection().is_some());
    }

    #[test]
    fn test_missing_call_places_caret_after_header() {
        let mut doc = ChunkDocument::new(DOC);
        doc.set_selection(Range::new(Position::new(0, 0), Position::new(0, 3)));
        let selected = sync_selection(&mut doc, None, Position::new(1, 5));
        assert_eq!(selected, Range::caret(Position::new(2, 0)));
        assert!(doc.selection().is_none());
    }

    #[test]
    fn test_absorb_line_break_only_at_end_of_row() {
        let doc = ChunkDocument::new(DOC);
        let at_eol = Range::new(Position::new(3, 0), Position::new(3, 34));
        assert_eq!(
            absorb_trailing_line_break(&doc, at_eol),
            Range::new(Position::new(3, 0), Position::new(4, 0))
        );

        let mid_row = Range::new(Position::new(3, 0), Position::new(3, 10));
        assert_eq!(absorb_trailing_line_break(&doc, mid_row), mid_row);

        let last = ChunkDocument::new("opts_chunk$set()");
        let range = Range::new(Position::new(0, 0), Position::new(0, 16));
        assert_eq!(absorb_trailing_line_break(&last, range), range);
    }

    #[test]
    fn test_header_on_last_row_targets_end_of_header() {
        let mut doc = ChunkDocument::new("text\n```{r setup}");
        let selected = sync_selection(&mut doc, None, Position::new(1, 0));
        assert_eq!(selected, Range::caret(Position::new(1, 12)));
    }

    fn token(kind: TokenKind, row: usize, text: &str) -> Token {
        Token::new(
            kind,
            text,
            Position::new(row, 0),
            Position::new(row, text.chars().count()),
        )
    }

    #[test]
    fn test_chunk_end_comes_from_boundary_tokens() {
        let doc = ChunkDocument::new(DOC);
        let tokens = vec![
            token(TokenKind::ChunkEnd, 0, "```"),
            token(TokenKind::ChunkStart, 1, "```{r setup}"),
            token(TokenKind::Identifier, 2, "library"),
            token(TokenKind::ChunkEnd, 4, "```"),
        ];
        let end = find_end_of_chunk(&tokens, Position::new(1, 0));
        assert_eq!(end, Some(4));
        assert_eq!(
            chunk_body_text(&doc, 1, end),
            "library(x)\nknitr::opts_chunk$set(echo = TRUE)"
        );
    }

    #[test]
    fn test_unterminated_chunk_runs_to_end() {
        let doc = ChunkDocument::new("```{r}\na <- 1\nb <- 2");
        let tokens = vec![token(TokenKind::ChunkStart, 0, "```{r}")];
        assert_eq!(find_end_of_chunk(&tokens, Position::new(0, 0)), None);
        assert_eq!(chunk_body_text(&doc, 0, None), "a <- 1\nb <- 2");
    }
}

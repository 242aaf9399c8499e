//! Token model and cursor.
//!
//! The tokenizer itself is a supplied capability ([`Tokenizer`]); this module only fixes the
//! token shape and the stepping interface the locator relies on. [`SliceCursor`] is the
//! standard cursor over an in-memory token list.

use crate::position::Position;

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// R identifier (`opts_chunk`, `set`, `` `odd name` ``).
    Identifier,
    /// Reserved word or literal constant (`TRUE`, `NULL`, `function`).
    Keyword,
    /// Numeric literal.
    Number,
    /// String literal including its quotes.
    String,
    /// Operator (`$`, `::`, `<-`, `=`, `%in%`).
    Operator,
    /// Brackets and separators (`(`, `]`, `{`, `,`, `;`).
    Punctuation,
    /// `#` comment to end of line.
    Comment,
    /// Prose outside of code chunks.
    Text,
    /// Opening fence of a code chunk.
    ChunkStart,
    /// Closing fence of a code chunk. This is the boundary marker.
    ChunkEnd,
    /// Anything the tokenizer could not classify.
    Unknown,
}

/// A single token with its document span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Classification.
    pub kind: TokenKind,
    /// Source text of the token.
    pub text: String,
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    /// Returns `true` for the chunk boundary marker.
    pub fn is_boundary(&self) -> bool {
        self.kind == TokenKind::ChunkEnd
    }

    /// Returns `true` if this token has the given kind and text.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Closing counterpart if this is an opening bracket.
    pub fn closing_delimiter(&self) -> Option<&'static str> {
        if self.kind != TokenKind::Punctuation {
            return None;
        }
        match self.text.as_str() {
            "(" => Some(")"),
            "[" => Some("]"),
            "{" => Some("}"),
            _ => None,
        }
    }
}

/// Bidirectional token stepping.
///
/// Cloning a cursor yields an independent snapshot: probing a clone never moves the original.
pub trait TokenCursor: Clone {
    /// Move to the next token and return it, or `None` past the end.
    fn step_forward(&mut self) -> Option<&Token>;

    /// Move to the previous token and return it, or `None` before the start.
    fn step_backward(&mut self) -> Option<&Token>;

    /// The token the cursor is on.
    fn current_token(&self) -> Option<&Token>;

    /// Start position of the current token.
    fn current_position(&self) -> Option<Position> {
        self.current_token().map(|token| token.start)
    }

    /// From an opening bracket, move to its matching closing bracket.
    ///
    /// Returns `false` (cursor unchanged) if the current token is not an opening bracket or no
    /// match exists before a boundary marker or the end of the stream.
    fn advance_to_matching_delimiter(&mut self) -> bool;
}

/// Produces tokens for a whole document.
pub trait Tokenizer {
    /// Tokenize a document (rows separated by `'\n'`).
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// A [`TokenCursor`] over a token slice.
#[derive(Debug, Clone, Copy)]
pub struct SliceCursor<'a> {
    tokens: &'a [Token],
    /// `None` = before the first token; `Some(len)` = past the end.
    index: Option<usize>,
}

impl<'a> SliceCursor<'a> {
    /// A cursor positioned before the first token.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            index: None,
        }
    }

    /// A cursor on the last token starting at or before `pos` (before the first token if none).
    pub fn at(tokens: &'a [Token], pos: Position) -> Self {
        let count = tokens.partition_point(|token| token.start <= pos);
        Self {
            tokens,
            index: count.checked_sub(1),
        }
    }

    /// Index of the current token, if on one.
    pub fn index(&self) -> Option<usize> {
        self.index.filter(|&i| i < self.tokens.len())
    }

    /// The underlying tokens.
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }
}

impl TokenCursor for SliceCursor<'_> {
    fn step_forward(&mut self) -> Option<&Token> {
        let next = self.index.map_or(0, |i| i + 1).min(self.tokens.len());
        self.index = Some(next);
        self.tokens.get(next)
    }

    fn step_backward(&mut self) -> Option<&Token> {
        match self.index {
            None | Some(0) => {
                self.index = None;
                None
            }
            Some(i) => {
                let prev = i.min(self.tokens.len()) - 1;
                self.index = Some(prev);
                self.tokens.get(prev)
            }
        }
    }

    fn current_token(&self) -> Option<&Token> {
        self.index.and_then(|i| self.tokens.get(i))
    }

    fn advance_to_matching_delimiter(&mut self) -> bool {
        let tokens = self.tokens;
        let Some(origin) = self.index() else {
            return false;
        };
        let Some(close) = tokens[origin].closing_delimiter() else {
            return false;
        };
        let open = tokens[origin].text.as_str();

        let mut depth = 0usize;
        for (offset, token) in tokens[origin + 1..].iter().enumerate() {
            if token.is_boundary() {
                return false;
            }
            if token.kind != TokenKind::Punctuation {
                continue;
            }
            if token.text == open {
                depth += 1;
            } else if token.text == close {
                if depth == 0 {
                    self.index = Some(origin + 1 + offset);
                    return true;
                }
                depth -= 1;
            }
        }

        false
    }
}

//! Chunk discovery over a token stream.

use chunk_opts::{Position, Token, TokenKind};

/// Label that marks the setup chunk.
pub const SETUP_LABEL: &str = "setup";

/// A code chunk found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Start of the header row.
    pub header: Position,
    /// Row of the closing fence, if the chunk is closed.
    pub end_row: Option<usize>,
    /// Engine name from the header (`r`).
    pub engine: String,
    /// Chunk label, if any.
    pub label: Option<String>,
}

impl ChunkSpan {
    /// Returns `true` for R chunks.
    pub fn is_r(&self) -> bool {
        self.engine.eq_ignore_ascii_case("r")
    }
}

/// Collect chunks from [`TokenKind::ChunkStart`] and [`TokenKind::ChunkEnd`] tokens.
pub fn find_chunks(tokens: &[Token]) -> Vec<ChunkSpan> {
    let mut chunks: Vec<ChunkSpan> = Vec::new();
    let mut open = false;

    for token in tokens {
        match token.kind {
            TokenKind::ChunkStart => {
                let (engine, label) = parse_header(&token.text);
                chunks.push(ChunkSpan {
                    header: token.start,
                    end_row: None,
                    engine,
                    label,
                });
                open = true;
            }
            TokenKind::ChunkEnd if open => {
                if let Some(chunk) = chunks.last_mut() {
                    chunk.end_row = Some(token.start.row);
                }
                open = false;
            }
            _ => {}
        }
    }
    chunks
}

/// The chunk labelled `setup`, falling back to the first R chunk.
pub fn find_setup_chunk(chunks: &[ChunkSpan]) -> Option<&ChunkSpan> {
    chunks
        .iter()
        .find(|chunk| chunk.is_r() && chunk.label.as_deref() == Some(SETUP_LABEL))
        .or_else(|| chunks.iter().find(|chunk| chunk.is_r()))
}

/// Split a header like ```` ```{r setup, include=FALSE} ```` into engine and label.
///
/// The label is the first bare word after the engine, or an explicit `label = "..."` option.
fn parse_header(header: &str) -> (String, Option<String>) {
    let inner = header
        .trim()
        .trim_start_matches('`')
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}');

    let engine_len = inner
        .find(|c: char| c.is_whitespace() || c == ',')
        .unwrap_or(inner.len());
    let engine = inner[..engine_len].to_string();

    let mut label = None;
    for (idx, part) in inner[engine_len..].split(',').enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.split_once('=') {
            Some((key, value)) if key.trim() == "label" => {
                label = Some(unquote(value.trim()).to_string());
                break;
            }
            None if idx == 0 => label = Some(part.to_string()),
            _ => {}
        }
    }
    (engine, label)
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value)
}

//! In-process baseline extraction from the options call arguments.

use crate::RMarkdownLexer;
use chunk_opts::{
    CallSyntax, ChunkOptionsConfig, ExtractError, LineIndex, OptionExtractor, OptionMap,
    SliceCursor, Token, TokenKind, locate_options_call,
};

/// Reads `name = value` arguments of the first options call in a chunk body.
///
/// Values keep their source text (`TRUE`, `6`, `"png"`); arguments without a name are skipped.
///
/// ```rust
/// use chunk_opts::{ChunkOptionsConfig, OptionExtractor};
/// use chunk_opts_lexer::CallArgumentExtractor;
///
/// let mut extractor = CallArgumentExtractor::new(&ChunkOptionsConfig::default()).unwrap();
/// let options = extractor
///     .extract_options("knitr::opts_chunk$set(echo = FALSE, fig.width = 7)")
///     .unwrap();
/// assert_eq!(options.get("echo"), Some("FALSE"));
/// assert_eq!(options.get("fig.width"), Some("7"));
/// ```
#[derive(Debug, Clone)]
pub struct CallArgumentExtractor {
    lexer: RMarkdownLexer,
    syntax: CallSyntax,
}

impl CallArgumentExtractor {
    /// Extractor for the call shape configured in `config`.
    pub fn new(config: &ChunkOptionsConfig) -> Result<Self, regex::Error> {
        Ok(Self::with_lexer(
            RMarkdownLexer::from_config(config)?,
            config.call_syntax(),
        ))
    }

    /// Extractor reusing an existing lexer.
    pub fn with_lexer(lexer: RMarkdownLexer, syntax: CallSyntax) -> Self {
        Self { lexer, syntax }
    }

    /// Position of a `object $ method (` head, if any, regardless of balance.
    fn call_head(&self, tokens: &[Token]) -> Option<usize> {
        tokens.windows(4).position(|w| {
            w[0].is(TokenKind::Identifier, &self.syntax.object)
                && w[1].is(TokenKind::Operator, "$")
                && w[2].is(TokenKind::Identifier, &self.syntax.method)
                && w[3].is(TokenKind::Punctuation, "(")
        })
    }
}

impl OptionExtractor for CallArgumentExtractor {
    type Error = ExtractError;

    fn extract_options(&mut self, source: &str) -> Result<OptionMap, Self::Error> {
        let tokens = self.lexer.tokenize_code(source);
        let mut cursor = SliceCursor::new(&tokens);

        let Some(range) = locate_options_call(&mut cursor, &self.syntax) else {
            return match self.call_head(&tokens) {
                Some(at) => Err(ExtractError::Unbalanced(tokens[at].start)),
                None => Ok(OptionMap::new()),
            };
        };

        let Some(close) = cursor.index() else {
            return Ok(OptionMap::new());
        };
        let Some(open) = tokens[..close]
            .iter()
            .position(|t| t.start >= range.start && t.is(TokenKind::Punctuation, "("))
        else {
            return Ok(OptionMap::new());
        };

        let index = LineIndex::from_text(source);
        let mut options = OptionMap::new();
        for argument in split_arguments(&tokens[open + 1..close]) {
            match argument.as_slice() {
                [name, eq, value @ ..]
                    if eq.is(TokenKind::Operator, "=") && !value.is_empty() =>
                {
                    let key = argument_name(name);
                    let (first, last) = (&value[0], &value[value.len() - 1]);
                    options.insert(key, index.slice(first.start, last.end));
                }
                [] => {}
                other => {
                    tracing::debug!(at = %other[0].start, "skipping unnamed option argument");
                }
            }
        }
        Ok(options)
    }
}

/// Split call arguments at top-level commas, dropping comments.
fn split_arguments(tokens: &[Token]) -> Vec<Vec<&Token>> {
    let mut arguments = vec![Vec::new()];
    let mut depth = 0usize;

    for token in tokens {
        if token.kind == TokenKind::Comment {
            continue;
        }
        if token.kind == TokenKind::Punctuation {
            match token.text.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth = depth.saturating_sub(1),
                "," if depth == 0 => {
                    arguments.push(Vec::new());
                    continue;
                }
                _ => {}
            }
        }
        if let Some(current) = arguments.last_mut() {
            current.push(token);
        }
    }
    arguments
}

/// Option name with backticks or quotes removed.
fn argument_name(token: &Token) -> String {
    let text = token.text.as_str();
    ['`', '"', '\'']
        .into_iter()
        .find_map(|q| text.strip_prefix(q).and_then(|t| t.strip_suffix(q)))
        .unwrap_or(text)
        .to_string()
}

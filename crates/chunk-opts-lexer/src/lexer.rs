//! R Markdown tokenizer.

use crate::rules::{ChunkFences, R_KEYWORDS, TokenRule};
use chunk_opts::{ChunkOptionsConfig, Position, Token, TokenKind, Tokenizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Prose,
    RChunk,
    OtherFence,
}

/// A string literal still open at the end of a row.
#[derive(Debug)]
struct OpenString {
    quote: char,
    start: Position,
    text: String,
}

/// Rule-based tokenizer for R Markdown documents and bare R code.
///
/// Inside R chunks it emits R tokens; the fence rows become [`TokenKind::ChunkStart`] and
/// [`TokenKind::ChunkEnd`]; other rows become one [`TokenKind::Text`] token each. Whitespace
/// produces no tokens.
///
/// ```rust
/// use chunk_opts::TokenKind;
/// use chunk_opts_lexer::RMarkdownLexer;
///
/// let lexer = RMarkdownLexer::new().unwrap();
/// let tokens = lexer.tokenize_document("```{r}\nknitr::opts_chunk$set(echo = TRUE)\n```");
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds.first(), Some(&TokenKind::ChunkStart));
/// assert_eq!(kinds.last(), Some(&TokenKind::ChunkEnd));
/// ```
#[derive(Debug, Clone)]
pub struct RMarkdownLexer {
    rules: Vec<TokenRule>,
    fences: ChunkFences,
}

impl RMarkdownLexer {
    /// Lexer with the default R rules and R Markdown fences.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self::with_rules(TokenRule::r_defaults()?, ChunkFences::rmarkdown()?))
    }

    /// Lexer whose chunks close with the configured `chunk_end_fence`.
    pub fn from_config(config: &ChunkOptionsConfig) -> Result<Self, regex::Error> {
        Ok(Self::with_rules(
            TokenRule::r_defaults()?,
            ChunkFences::rmarkdown_closed_by(&config.chunk_end_fence)?,
        ))
    }

    /// Lexer with custom rules and fences.
    pub fn with_rules(rules: Vec<TokenRule>, fences: ChunkFences) -> Self {
        Self { rules, fences }
    }

    /// Tokenize a full R Markdown document.
    pub fn tokenize_document(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut region = Region::Prose;
        let mut open_string = None;

        let mut end = Position::default();

        for (row, line) in text.split('\n').enumerate() {
            end = Position::new(row, line.chars().count());
            match region {
                Region::Prose => {
                    if self.fences.is_r_start(line) {
                        tokens.push(whole_row(TokenKind::ChunkStart, row, line));
                        region = Region::RChunk;
                    } else {
                        if self.fences.is_any_start(line) {
                            region = Region::OtherFence;
                        }
                        push_text(&mut tokens, row, line);
                    }
                }
                Region::RChunk => {
                    if self.fences.is_end(line) {
                        flush_open_string(&mut tokens, &mut open_string, Position::new(row, 0));
                        tokens.push(whole_row(TokenKind::ChunkEnd, row, line));
                        region = Region::Prose;
                    } else {
                        self.lex_code_row(row, line, &mut open_string, &mut tokens);
                    }
                }
                Region::OtherFence => {
                    if self.fences.is_end(line) {
                        region = Region::Prose;
                    }
                    push_text(&mut tokens, row, line);
                }
            }
        }

        flush_open_string(&mut tokens, &mut open_string, end);
        tokens
    }

    /// Tokenize bare R code (no fences), e.g. a chunk body.
    pub fn tokenize_code(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut open_string = None;
        let mut end = Position::default();
        for (row, line) in text.split('\n').enumerate() {
            self.lex_code_row(row, line, &mut open_string, &mut tokens);
            end = Position::new(row, line.chars().count());
        }
        flush_open_string(&mut tokens, &mut open_string, end);
        tokens
    }

    fn lex_code_row(
        &self,
        row: usize,
        line: &str,
        open_string: &mut Option<OpenString>,
        tokens: &mut Vec<Token>,
    ) {
        let mut byte = 0;
        let mut col = 0;

        if let Some(mut pending) = open_string.take() {
            let (len, closed) = scan_string_body(line, pending.quote);
            pending.text.push_str(&line[..len]);
            col += line[..len].chars().count();
            byte += len;
            if closed {
                tokens.push(Token::new(
                    TokenKind::String,
                    pending.text,
                    pending.start,
                    Position::new(row, col),
                ));
            } else {
                pending.text.push('\n');
                *open_string = Some(pending);
                return;
            }
        }

        while byte < line.len() {
            let rest = &line[byte..];
            let Some(ch) = rest.chars().next() else {
                break;
            };

            if ch.is_whitespace() {
                byte += ch.len_utf8();
                col += 1;
                continue;
            }

            let start = Position::new(row, col);
            if ch == '"' || ch == '\'' {
                let (body_len, closed) = scan_string_body(&rest[1..], ch);
                let len = 1 + body_len;
                let text = &rest[..len];
                if !closed {
                    *open_string = Some(OpenString {
                        quote: ch,
                        start,
                        text: format!("{text}\n"),
                    });
                    return;
                }
                col += text.chars().count();
                byte += len;
                tokens.push(Token::new(TokenKind::String, text, start, Position::new(row, col)));
                continue;
            }

            let (kind, len) = self
                .rules
                .iter()
                .find_map(|rule| rule.match_len(rest).map(|len| (rule.kind(), len)))
                .unwrap_or((TokenKind::Unknown, ch.len_utf8()));
            let text = &rest[..len];
            let kind = if kind == TokenKind::Identifier && R_KEYWORDS.contains(&text) {
                TokenKind::Keyword
            } else {
                kind
            };
            col += text.chars().count();
            byte += len;
            tokens.push(Token::new(kind, text, start, Position::new(row, col)));
        }
    }
}

impl Tokenizer for RMarkdownLexer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenize_document(text)
    }
}

/// Scan a string body after its opening quote. Returns the consumed byte length (closing quote
/// included) and whether the string closed on this row.
fn scan_string_body(rest: &str, quote: char) -> (usize, bool) {
    let mut escaped = false;
    for (idx, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return (idx + ch.len_utf8(), true);
        }
    }
    (rest.len(), false)
}

/// Emit an unterminated string as-is, ending at `end`.
fn flush_open_string(tokens: &mut Vec<Token>, open_string: &mut Option<OpenString>, end: Position) {
    if let Some(mut pending) = open_string.take() {
        if pending.text.ends_with('\n') {
            pending.text.pop();
        }
        tokens.push(Token::new(
            TokenKind::String,
            pending.text,
            pending.start,
            end,
        ));
    }
}

fn whole_row(kind: TokenKind, row: usize, line: &str) -> Token {
    Token::new(
        kind,
        line,
        Position::new(row, 0),
        Position::new(row, line.chars().count()),
    )
}

fn push_text(tokens: &mut Vec<Token>, row: usize, line: &str) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = line.chars().take_while(|c| c.is_whitespace()).count();
    tokens.push(Token::new(
        TokenKind::Text,
        trimmed,
        Position::new(row, lead),
        Position::new(row, lead + trimmed.chars().count()),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds_and_text(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn test_options_call_tokens() {
        let lexer = RMarkdownLexer::new().unwrap();
        let tokens = lexer.tokenize_code("knitr:::opts_chunk$set(fig.width = 6.5, dev = 'png')");
        use TokenKind::*;
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (Identifier, "knitr"),
                (Operator, ":::"),
                (Identifier, "opts_chunk"),
                (Operator, "$"),
                (Identifier, "set"),
                (Punctuation, "("),
                (Identifier, "fig.width"),
                (Operator, "="),
                (Number, "6.5"),
                (Punctuation, ","),
                (Identifier, "dev"),
                (Operator, "="),
                (String, "'png'"),
                (Punctuation, ")"),
            ]
        );
        assert_eq!(tokens[2].start, Position::new(0, 8));
        assert_eq!(tokens[13].end, Position::new(0, 52));
    }

    #[test]
    fn test_keywords_comments_and_operators() {
        let lexer = RMarkdownLexer::new().unwrap();
        let tokens = lexer.tokenize_code("x <- TRUE %in% y # note\nf(`odd name`)");
        use TokenKind::*;
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (Identifier, "x"),
                (Operator, "<-"),
                (Keyword, "TRUE"),
                (Operator, "%in%"),
                (Identifier, "y"),
                (Comment, "# note"),
                (Identifier, "f"),
                (Punctuation, "("),
                (Identifier, "`odd name`"),
                (Punctuation, ")"),
            ]
        );
        assert_eq!(tokens[6].start, Position::new(1, 0));
    }

    #[test]
    fn test_multi_row_string() {
        let lexer = RMarkdownLexer::new().unwrap();
        let tokens = lexer.tokenize_code("cap <- \"first\nsecond\" ; z");
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, "\"first\nsecond\"");
        assert_eq!(tokens[2].start, Position::new(0, 7));
        assert_eq!(tokens[2].end, Position::new(1, 7));
        assert_eq!(tokens[3].text, ";");
        assert_eq!(tokens[4].text, "z");
    }

    #[test]
    fn test_escaped_quote_and_unicode_columns() {
        let lexer = RMarkdownLexer::new().unwrap();
        let tokens = lexer.tokenize_code("s = \"a\\\"b\" ; 名前 = 1");
        assert_eq!(tokens[2].text, "\"a\\\"b\"");
        assert_eq!(tokens[4].text, "名前");
        assert_eq!(tokens[4].start, Position::new(0, 13));
        assert_eq!(tokens[4].end, Position::new(0, 15));
    }

    #[test]
    fn test_document_regions() {
        let lexer = RMarkdownLexer::new().unwrap();
        let doc = "# Title\n\n```python\nopts_chunk$set()\n```\n```{r setup}\nx\n```\nafter";
        let tokens = lexer.tokenize_document(doc);
        use TokenKind::*;
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (Text, "# Title"),
                (Text, "```python"),
                (Text, "opts_chunk$set()"),
                (Text, "```"),
                (ChunkStart, "```{r setup}"),
                (Identifier, "x"),
                (ChunkEnd, "```"),
                (Text, "after"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_stops_at_fence() {
        let lexer = RMarkdownLexer::new().unwrap();
        let tokens = lexer.tokenize_document("```{r}\nx <- 'open\n```\ntext");
        assert_eq!(tokens[3].kind, TokenKind::String);
        assert_eq!(tokens[3].text, "'open");
        assert_eq!(tokens[4].kind, TokenKind::ChunkEnd);
        assert_eq!(tokens[4].start, Position::new(2, 0));
    }

    #[test]
    fn test_unterminated_string_ends_at_document_end() {
        let lexer = RMarkdownLexer::new().unwrap();
        let tokens = lexer.tokenize_document("```{r}\nx <- 'open\nmore");
        let last = tokens.last().unwrap();
        assert_eq!(last.text, "'open\nmore");
        assert_eq!(last.end, Position::new(2, 4));

        let tokens = lexer.tokenize_code("s <- 'a\nb");
        assert_eq!(tokens[2].end, Position::new(1, 1));
    }
}

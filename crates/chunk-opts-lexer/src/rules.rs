//! Regex token rules for R code and R Markdown chunk fences.

use chunk_opts::TokenKind;
use regex::Regex;

/// R reserved words and literal constants.
pub const R_KEYWORDS: &[&str] = &[
    "TRUE",
    "FALSE",
    "NULL",
    "NA",
    "NA_integer_",
    "NA_real_",
    "NA_character_",
    "NA_complex_",
    "Inf",
    "NaN",
    "if",
    "else",
    "repeat",
    "while",
    "function",
    "for",
    "in",
    "next",
    "break",
];

/// A single anchored token rule.
#[derive(Debug, Clone)]
pub struct TokenRule {
    regex: Regex,
    kind: TokenKind,
}

impl TokenRule {
    /// Compile `pattern`; it is anchored to the current scan position.
    pub fn new(pattern: &str, kind: TokenKind) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&format!("^(?:{pattern})"))?,
            kind,
        })
    }

    /// Kind assigned to matches.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Length in bytes of the match at the start of `rest`, if any.
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        self.regex
            .find(rest)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }

    /// Default R rules, in priority order. Strings and whitespace are scanned separately.
    pub fn r_defaults() -> Result<Vec<Self>, regex::Error> {
        Ok(vec![
            Self::new(r"#.*", TokenKind::Comment)?,
            // `non-syntactic name`
            Self::new(r"`(?:\\.|[^`\\])*`", TokenKind::Identifier)?,
            Self::new(
                r"0[xX][0-9a-fA-F]+[Li]?|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?[Li]?",
                TokenKind::Number,
            )?,
            Self::new(r"[\p{L}.][\p{L}\p{N}._]*", TokenKind::Identifier)?,
            Self::new(
                r":::|::|<<-|->>|<-|->|<=|>=|==|!=|&&|\|\||\|>|%[^%\n]*%|[-+*/^~?!&|<>=$@:\\]",
                TokenKind::Operator,
            )?,
            Self::new(r"[()\[\]{},;]", TokenKind::Punctuation)?,
        ])
    }
}

/// Line patterns that open and close code chunks.
#[derive(Debug, Clone)]
pub struct ChunkFences {
    r_start: Regex,
    any_start: Regex,
    end: Regex,
}

impl ChunkFences {
    /// Build from explicit patterns.
    pub fn new(r_start: &str, any_start: &str, end: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            r_start: Regex::new(r_start)?,
            any_start: Regex::new(any_start)?,
            end: Regex::new(end)?,
        })
    }

    /// R Markdown fences: ```` ```{r label, opt=...} ```` ... ```` ``` ````, optionally
    /// indented by four spaces.
    pub fn rmarkdown() -> Result<Self, regex::Error> {
        Self::rmarkdown_closed_by("```")
    }

    /// R Markdown openers with chunks closed by `fence`.
    ///
    /// A closing row is `fence` alone on its row, optionally lengthened by repeating its last
    /// character (```` ```` ```` closes a ```` ``` ```` chunk) and surrounded by whitespace.
    pub fn rmarkdown_closed_by(fence: &str) -> Result<Self, regex::Error> {
        let fence = fence.trim();
        let repeat = fence
            .chars()
            .last()
            .map(|c| format!("{}*", regex::escape(&c.to_string())))
            .unwrap_or_default();
        Self::new(
            r"^(?:[ ]{4})?`{3,}\s*\{[Rr](?:[\s,].*)?\}\s*$",
            r"^(?:[ ]{4})?`{3,}",
            &format!(r"^\s*{}{repeat}\s*$", regex::escape(fence)),
        )
    }

    /// Returns `true` if `line` opens an R chunk.
    pub fn is_r_start(&self, line: &str) -> bool {
        self.r_start.is_match(line)
    }

    /// Returns `true` if `line` opens any fenced block.
    pub fn is_any_start(&self, line: &str) -> bool {
        self.any_start.is_match(line)
    }

    /// Returns `true` if `line` closes a fenced block.
    pub fn is_end(&self, line: &str) -> bool {
        self.end.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_anchored() {
        let rule = TokenRule::new(r"[a-z]+", TokenKind::Identifier).unwrap();
        assert_eq!(rule.match_len("abc def"), Some(3));
        assert_eq!(rule.match_len(" abc"), None);
    }

    #[test]
    fn test_r_fences() {
        let fences = ChunkFences::rmarkdown().unwrap();
        assert!(fences.is_r_start("```{r}"));
        assert!(fences.is_r_start("```{r setup, include=FALSE}"));
        assert!(fences.is_r_start("    ````{R}"));
        assert!(!fences.is_r_start("```{python}"));
        assert!(!fences.is_r_start("```{rust}"));
        assert!(fences.is_any_start("```python"));
        assert!(fences.is_end("```"));
        assert!(fences.is_end("````  "));
        assert!(!fences.is_end("```{r}"));
        assert!(!fences.is_end("``"));
    }

    #[test]
    fn test_configured_closing_fence() {
        let fences = ChunkFences::rmarkdown_closed_by("~~~").unwrap();
        assert!(fences.is_r_start("```{r setup}"));
        assert!(fences.is_end("~~~"));
        assert!(fences.is_end("  ~~~~ "));
        assert!(!fences.is_end("```"));
        assert!(!fences.is_end("~~~ x"));
    }
}

use chunk_opts::{
    BaselineState, ChunkDocument, ChunkOptionsConfig, EditDirectives, EditorSurface, ExtractError,
    OptionExtractor, OptionMap, PanelError, Position, Range, SetupChunkPanel, Token, TokenKind,
    Tokenizer,
};
use pretty_assertions::assert_eq;

const DOC: &str = "---\ntitle: x\n---\n\n```{r setup}\nlibrary(ggplot2)\n```\n";

/// Emits a header token for every row starting with a fence and nothing else.
struct FencesOnly;

impl Tokenizer for FencesOnly {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split('\n')
            .enumerate()
            .filter(|(_, line)| line.starts_with("```"))
            .map(|(row, line)| {
                let kind = if line.trim() == "```" {
                    TokenKind::ChunkEnd
                } else {
                    TokenKind::ChunkStart
                };
                Token::new(
                    kind,
                    line,
                    Position::new(row, 0),
                    Position::new(row, line.chars().count()),
                )
            })
            .collect()
    }
}

struct Fixed(Result<OptionMap, ExtractError>, Vec<String>);

impl OptionExtractor for Fixed {
    type Error = ExtractError;

    fn extract_options(&mut self, source: &str) -> Result<OptionMap, Self::Error> {
        self.1.push(source.to_string());
        self.0.clone()
    }
}

fn panel() -> SetupChunkPanel<FencesOnly> {
    SetupChunkPanel::open(Position::new(4, 0), FencesOnly, ChunkOptionsConfig::default())
}

#[test]
fn test_commit_requires_baseline() {
    let mut doc = ChunkDocument::new(DOC);
    let mut panel = panel();
    assert_eq!(
        panel.commit(&mut doc, &EditDirectives::new()),
        Err(PanelError::BaselineNotReady)
    );

    panel.request_baseline(&doc);
    assert_eq!(panel.baseline(), &BaselineState::Pending);
    assert_eq!(
        panel.commit(&mut doc, &EditDirectives::new()),
        Err(PanelError::BaselineNotReady)
    );
    assert_eq!(doc.text(), DOC);
}

#[test]
fn test_request_carries_chunk_body() {
    let doc = ChunkDocument::new(DOC);
    let mut extractor = Fixed(Ok(OptionMap::new()), Vec::new());
    let mut panel = panel();
    panel.initialize_with(&doc, &mut extractor);
    assert_eq!(extractor.1, vec!["library(ggplot2)".to_string()]);
    assert_eq!(panel.baseline(), &BaselineState::Ready(OptionMap::new()));
}

#[test]
fn test_extraction_failure_degrades_to_empty_baseline() {
    let mut doc = ChunkDocument::new(DOC);
    let mut extractor = Fixed(Err(ExtractError::Service("R session busy".into())), Vec::new());
    let mut panel = panel();
    panel.initialize_with(&doc, &mut extractor);
    assert_eq!(panel.baseline().options(), Some(&OptionMap::new()));

    let outcome = panel
        .commit(&mut doc, &EditDirectives::new().echo("TRUE").fig_width("6"))
        .unwrap();
    assert!(!outcome.located);
    assert_eq!(outcome.replaced, Range::caret(Position::new(5, 0)));
    assert_eq!(
        doc.text(),
        "---\ntitle: x\n---\n\n```{r setup}\nknitr::opts_chunk$set(echo = TRUE, fig.width = 6)\nlibrary(ggplot2)\n```\n"
    );
}

#[test]
fn test_late_resolution_is_ignored() {
    let doc = ChunkDocument::new(DOC);
    let mut panel = panel();
    panel.request_baseline(&doc);
    let first: OptionMap = [("cache", "TRUE")].into_iter().collect();
    panel.resolve_baseline::<ExtractError>(Ok(first.clone()));
    panel.resolve_baseline::<ExtractError>(Ok(OptionMap::new()));
    assert_eq!(panel.baseline().options(), Some(&first));
}

#[test]
fn test_empty_merge_inserts_nothing() {
    let mut doc = ChunkDocument::new(DOC);
    let mut panel = panel();
    panel.seed_baseline(OptionMap::new());
    let outcome = panel.commit(&mut doc, &EditDirectives::new()).unwrap();
    assert_eq!(outcome.code, "");
    assert_eq!(doc.text(), DOC);
    assert_eq!(doc.caret(), Position::new(5, 0));
}

#[test]
fn test_committed_options_become_baseline() {
    let mut doc = ChunkDocument::new(DOC);
    let mut panel = panel();
    panel.seed_baseline([("foo", "bar")].into_iter().collect());
    let outcome = panel
        .commit(&mut doc, &EditDirectives::new().message(false))
        .unwrap();
    assert_eq!(panel.baseline().options(), Some(&outcome.options));
    assert_eq!(
        outcome.code,
        "knitr::opts_chunk$set(foo = bar, message = FALSE)\n"
    );
}

#[test]
fn test_insert_after_header_on_last_row() {
    let mut doc = ChunkDocument::new("```{r setup}");
    let mut panel =
        SetupChunkPanel::open(Position::new(0, 0), FencesOnly, ChunkOptionsConfig::default());
    panel.seed_baseline(OptionMap::new());

    let outcome = panel
        .commit(&mut doc, &EditDirectives::new().echo("TRUE"))
        .unwrap();
    assert_eq!(outcome.replaced, Range::caret(Position::new(0, 12)));
    assert_eq!(outcome.code, "\nknitr::opts_chunk$set(echo = TRUE)\n");
    assert_eq!(doc.text(), "```{r setup}\nknitr::opts_chunk$set(echo = TRUE)\n");
}

#[test]
fn test_empty_merge_on_last_row_leaves_header_alone() {
    let mut doc = ChunkDocument::new("```{r setup}");
    let mut panel =
        SetupChunkPanel::open(Position::new(0, 0), FencesOnly, ChunkOptionsConfig::default());
    panel.seed_baseline(OptionMap::new());

    let outcome = panel.commit(&mut doc, &EditDirectives::new()).unwrap();
    assert_eq!(outcome.code, "");
    assert_eq!(doc.text(), "```{r setup}");
}

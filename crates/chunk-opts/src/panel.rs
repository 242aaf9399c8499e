//! Setup-chunk options panel session.
//!
//! A [`SetupChunkPanel`] is bound to one chunk header. It obtains the baseline once, then on
//! every [`commit`](SetupChunkPanel::commit) re-locates the options call, selects it (or
//! places an insertion caret), merges the form state into the baseline, and writes the
//! rendered call back.
//!
//! ```rust
//! use chunk_opts::{
//!     ChunkDocument, ChunkOptionsConfig, EditDirectives, EditorSurface, OptionMap, Position,
//!     SetupChunkPanel, Token, Tokenizer,
//! };
//!
//! // A tokenizer that sees no options call, so commits insert after the header.
//! struct NoCalls;
//! impl Tokenizer for NoCalls {
//!     fn tokenize(&self, _text: &str) -> Vec<Token> {
//!         Vec::new()
//!     }
//! }
//!
//! let mut doc = ChunkDocument::new("```{r setup}\n```\n");
//! let mut panel = SetupChunkPanel::open(Position::new(0, 0), NoCalls, ChunkOptionsConfig::default());
//! panel.seed_baseline(OptionMap::new());
//! panel.commit(&mut doc, &EditDirectives::new().echo("FALSE")).unwrap();
//! assert_eq!(doc.text(), "```{r setup}\nknitr::opts_chunk$set(echo = FALSE)\n```\n");
//! ```

use crate::config::{CallSyntax, ChunkOptionsConfig};
use crate::document::EditorSurface;
use crate::extract::{BaselineRequest, BaselineState, OptionExtractor};
use crate::locator::locate_options_call;
use crate::merge::{EditDirectives, merge_options};
use crate::options::OptionMap;
use crate::position::{Position, Range};
use crate::sync::{
    absorb_trailing_line_break, chunk_body_text, find_end_of_chunk, sync_selection,
};
use crate::synthesize::CodeSynthesizer;
use crate::token::{SliceCursor, Tokenizer};
use std::fmt::Display;
use thiserror::Error;

/// Errors returned by panel operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("baseline options have not been seeded yet")]
    /// `commit` was called before the baseline resolved.
    BaselineNotReady,
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Range that was overwritten (empty when inserting).
    pub replaced: Range,
    /// Text written over `replaced`.
    pub code: String,
    /// Merged options; also the new baseline.
    pub options: OptionMap,
    /// Whether an existing call was found.
    pub located: bool,
}

/// One editing session for the options call of a chunk.
#[derive(Debug)]
pub struct SetupChunkPanel<T> {
    chunk_start: Position,
    tokenizer: T,
    syntax: CallSyntax,
    synthesizer: CodeSynthesizer,
    baseline: BaselineState,
}

impl<T: Tokenizer> SetupChunkPanel<T> {
    /// Open a session for the chunk whose header starts at `chunk_start`.
    pub fn open(chunk_start: Position, tokenizer: T, config: ChunkOptionsConfig) -> Self {
        Self {
            chunk_start,
            tokenizer,
            syntax: config.call_syntax(),
            synthesizer: CodeSynthesizer::new(&config),
            baseline: BaselineState::Unrequested,
        }
    }

    /// Current baseline state.
    pub fn baseline(&self) -> &BaselineState {
        &self.baseline
    }

    /// Collect the chunk body for the extraction service and mark the baseline pending.
    pub fn request_baseline<S: EditorSurface + ?Sized>(&mut self, surface: &S) -> BaselineRequest {
        self.baseline = BaselineState::Pending;
        let tokens = self.tokenizer.tokenize(&surface.text());
        let end_row = find_end_of_chunk(&tokens, self.chunk_start);
        BaselineRequest {
            source: chunk_body_text(surface, self.chunk_start.row, end_row),
        }
    }

    /// Apply the extraction service's answer.
    ///
    /// Failures are logged and seed an empty baseline so commits still work. A second answer
    /// after the baseline is ready is ignored.
    pub fn resolve_baseline<E: Display>(&mut self, result: Result<OptionMap, E>) {
        if matches!(self.baseline, BaselineState::Ready(_)) {
            tracing::debug!("ignoring late baseline extraction result");
            return;
        }
        match result {
            Ok(options) => self.seed_baseline(options),
            Err(err) => {
                tracing::warn!(error = %err, "chunk option extraction failed, using empty baseline");
                self.seed_baseline(OptionMap::new());
            }
        }
    }

    /// Seed the baseline directly.
    pub fn seed_baseline(&mut self, options: OptionMap) {
        tracing::debug!(count = options.len(), "baseline chunk options seeded");
        self.baseline = BaselineState::Ready(options);
    }

    /// Request and resolve the baseline synchronously with `extractor`.
    pub fn initialize_with<S, X>(&mut self, surface: &S, extractor: &mut X)
    where
        S: EditorSurface + ?Sized,
        X: OptionExtractor,
    {
        let request = self.request_baseline(surface);
        let result = extractor.extract_options(&request.source);
        self.resolve_baseline(result);
    }

    /// Range of the existing options call in the chunk, if any.
    pub fn locate<S: EditorSurface + ?Sized>(&self, surface: &S) -> Option<Range> {
        let tokens = self.tokenizer.tokenize(&surface.text());
        let mut cursor = SliceCursor::at(&tokens, self.chunk_start);
        locate_options_call(&mut cursor, &self.syntax)
    }

    /// Locate, select, merge, render and write the options call.
    pub fn commit<S: EditorSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        edits: &EditDirectives,
    ) -> Result<CommitOutcome, PanelError> {
        let baseline = self
            .baseline
            .options()
            .ok_or(PanelError::BaselineNotReady)?;

        let found = self.locate(surface);
        let selected = sync_selection(surface, found, self.chunk_start);
        let options = merge_options(baseline, edits);
        let mut code = self.synthesizer.render(&options);

        let replaced = match found {
            Some(_) => absorb_trailing_line_break(surface, selected),
            None => {
                // No body row yet: the header is the last row.
                if selected.start.row == self.chunk_start.row && !code.is_empty() {
                    code.insert(0, '\n');
                }
                selected
            }
        };
        surface.insert_text(replaced, &code);
        tracing::debug!(
            located = found.is_some(),
            range = %replaced,
            count = options.len(),
            "committed chunk options"
        );

        self.baseline = BaselineState::Ready(options.clone());
        Ok(CommitOutcome {
            replaced,
            code,
            options,
            located: found.is_some(),
        })
    }
}

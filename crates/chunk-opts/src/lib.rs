#![warn(missing_docs)]
//! Chunk Opts - headless editing of knitr chunk option calls
//!
//! # Overview
//!
//! `chunk-opts` keeps a chunk-options form and the `knitr::opts_chunk$set(...)` call inside an
//! R Markdown setup chunk in sync. It does not render anything and does not tokenize; hosts
//! supply an [`EditorSurface`] and a [`Tokenizer`] (see `chunk-opts-lexer`).
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  SetupChunkPanel (seed_baseline / commit)   │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Code Synthesizer                           │  ← OptionMap → source text
//! ├─────────────────────────────────────────────┤
//! │  Option Merger                              │  ← baseline + form edits
//! ├─────────────────────────────────────────────┤
//! │  Selection Synchronizer                     │  ← select call / place caret
//! ├─────────────────────────────────────────────┤
//! │  Option Block Locator                       │  ← token scan
//! ├─────────────────────────────────────────────┤
//! │  Token Cursor / Editor Surface              │  ← supplied capabilities
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Module Description
//!
//! - [`position`] - positions, ranges and selections
//! - [`line_index`] - rope based line index
//! - [`document`] - editor surface trait and in-memory document
//! - [`token`] - token model, cursor trait, slice cursor
//! - [`locator`] - finds the existing options call
//! - [`sync`] - selection synchronization and chunk row helpers
//! - [`merge`] - form edits folded into the baseline
//! - [`synthesize`] - renders the call
//! - [`extract`] - baseline extraction seam
//! - [`panel`] - the editing session

pub mod config;
pub mod document;
pub mod extract;
pub mod line_ending;
pub mod line_index;
pub mod locator;
pub mod merge;
pub mod options;
pub mod panel;
pub mod position;
pub mod sync;
pub mod synthesize;
pub mod token;

pub use config::{CallSyntax, ChunkOptionsConfig, ConfigError};
pub use document::{ChunkDocument, EditorSurface};
pub use extract::{BaselineRequest, BaselineState, ExtractError, OptionExtractor};
pub use line_ending::LineEnding;
pub use line_index::LineIndex;
pub use locator::locate_options_call;
pub use merge::{EditDirectives, TriState, merge_options};
pub use options::{FALSE_LITERAL, OptionMap, TRUE_LITERAL};
pub use panel::{CommitOutcome, PanelError, SetupChunkPanel};
pub use position::{Position, Range, Selection};
pub use sync::{
    absorb_trailing_line_break, body_insertion_point, chunk_body_text, find_end_of_chunk,
    sync_selection,
};
pub use synthesize::CodeSynthesizer;
pub use token::{SliceCursor, Token, TokenCursor, TokenKind, Tokenizer};

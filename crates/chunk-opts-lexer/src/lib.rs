//! `chunk-opts-lexer` - regex-rule R Markdown tokenizer for `chunk-opts`.
//!
//! Provides the [`Tokenizer`](chunk_opts::Tokenizer) a [`chunk_opts::SetupChunkPanel`] scans,
//! chunk discovery for picking the setup chunk, and an in-process
//! [`OptionExtractor`](chunk_opts::OptionExtractor) that reads the existing options call.

pub mod chunks;
pub mod extract;
pub mod lexer;
pub mod rules;

pub use chunks::{ChunkSpan, SETUP_LABEL, find_chunks, find_setup_chunk};
pub use extract::CallArgumentExtractor;
pub use lexer::RMarkdownLexer;
pub use rules::{ChunkFences, R_KEYWORDS, TokenRule};

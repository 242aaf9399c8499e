//! Baseline extraction interfaces.
//!
//! The baseline is produced once per panel session by an external service. Implementations
//! may run anywhere (an R session, a language server, in-process parsing); the panel only
//! sees the finished [`OptionMap`] or an error.

use crate::options::OptionMap;
use crate::position::Position;
use thiserror::Error;

/// Errors produced by baseline extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("expected a JSON object of options, got {0}")]
    /// The service reply was not a JSON object.
    NotAnObject(&'static str),

    #[error("unbalanced options call starting at {0}")]
    /// The options call is missing its closing parenthesis.
    Unbalanced(Position),

    #[error("option extraction failed: {0}")]
    /// The service reported a failure.
    Service(String),
}

/// Produces the baseline option mapping from chunk source text.
pub trait OptionExtractor {
    /// The error type returned by [`OptionExtractor::extract_options`].
    type Error: std::fmt::Display;

    /// Extract the options currently set in `source` (the chunk body).
    fn extract_options(&mut self, source: &str) -> Result<OptionMap, Self::Error>;
}

/// Text sent to the extraction service when a panel opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineRequest {
    /// Chunk body (rows between header and closing fence).
    pub source: String,
}

/// Baseline lifecycle within a panel session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BaselineState {
    /// No request issued yet.
    #[default]
    Unrequested,
    /// A request is in flight.
    Pending,
    /// Seeded, either from the service or after a logged failure.
    Ready(OptionMap),
}

impl BaselineState {
    /// The baseline, once seeded.
    pub fn options(&self) -> Option<&OptionMap> {
        match self {
            Self::Ready(options) => Some(options),
            Self::Unrequested | Self::Pending => None,
        }
    }
}

//! Option block locator.
//!
//! Scans forward from a chunk header for the first `[ns::|ns:::]object$method( ... )` call
//! and reports its range. Scanning stops at the chunk boundary marker; a call never spans
//! past the end of its chunk.

use crate::config::CallSyntax;
use crate::position::{Position, Range};
use crate::token::{TokenCursor, TokenKind};

/// Namespace qualifier operators accepted before the anchor identifier.
const NAMESPACE_OPERATORS: [&str; 2] = ["::", ":::"];

enum Step {
    Matched,
    Mismatch,
    Stop,
}

/// Find the first options call after the cursor.
///
/// The cursor should be positioned on (or before) the chunk header. Returns the range from the
/// namespace qualifier (or the bare anchor identifier) to just after the closing parenthesis,
/// or `None` if the boundary marker or end of stream comes first.
///
/// A candidate that breaks the `object $ method (` sequence is abandoned and scanning resumes
/// with the token after the mismatch.
pub fn locate_options_call<C: TokenCursor>(cursor: &mut C, syntax: &CallSyntax) -> Option<Range> {
    loop {
        let token = cursor.step_forward()?;
        if token.is_boundary() {
            return None;
        }
        if !token.is(TokenKind::Identifier, &syntax.object) {
            continue;
        }

        let mut start = token.start;
        if let Some(prefix) = namespace_prefix_start(cursor.clone(), syntax) {
            start = prefix;
        }

        let sequence = [
            (TokenKind::Operator, "$"),
            (TokenKind::Identifier, syntax.method.as_str()),
            (TokenKind::Punctuation, "("),
        ];
        let mut matched = true;
        for (kind, text) in sequence {
            match expect_next(cursor, kind, text) {
                Step::Matched => {}
                Step::Mismatch => {
                    matched = false;
                    break;
                }
                Step::Stop => return None,
            }
        }
        if !matched {
            tracing::debug!(at = %start, "abandoning `{}` candidate", syntax.object);
            continue;
        }

        if !cursor.advance_to_matching_delimiter() {
            tracing::debug!(at = %start, "unbalanced options call, continuing scan");
            continue;
        }

        let end = cursor.current_token()?.end;
        return Some(Range::new(start, end));
    }
}

/// Probe backwards from the anchor identifier for `namespace ::` on a snapshot cursor.
fn namespace_prefix_start<C: TokenCursor>(mut behind: C, syntax: &CallSyntax) -> Option<Position> {
    let op = behind.step_backward()?;
    if op.kind != TokenKind::Operator || !NAMESPACE_OPERATORS.contains(&op.text.as_str()) {
        return None;
    }

    let ns = behind.step_backward()?;
    ns.is(TokenKind::Identifier, &syntax.namespace)
        .then_some(ns.start)
}

fn expect_next<C: TokenCursor>(cursor: &mut C, kind: TokenKind, text: &str) -> Step {
    match cursor.step_forward() {
        None => Step::Stop,
        Some(token) if token.is_boundary() => Step::Stop,
        Some(token) if token.is(kind, text) => Step::Matched,
        Some(_) => Step::Mismatch,
    }
}

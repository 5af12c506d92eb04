//! Single-line comment locator.
//!
//! A comment runs from `%` through the next newline, inclusive. This is a
//! textual heuristic: escaped `\%` and `%` inside verbatim blocks are also
//! treated as comment starts, and a `%` on the last line without a trailing
//! newline is not a comment.

use std::sync::LazyLock;

use regex::Regex;

use crate::span::{contained_in_any, Span};
use crate::utils::compile_static;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| compile_static(r"%[^\n]*\n"));

/// Finds every comment span, left to right, without overlap.
#[must_use]
pub fn find_comments(text: &str) -> Vec<Span> {
    COMMENT
        .find_iter(text)
        .map(|m| Span::from(m.range()))
        .collect()
}

/// Returns true if `span` falls inside any comment.
#[must_use]
pub fn in_comment(span: &Span, comments: &[Span]) -> bool {
    contained_in_any(span, comments)
}

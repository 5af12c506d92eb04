//! Bibliography entry extraction.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::entry::ReferenceEntry;
use crate::finder::comments::in_comment;
use crate::span::Span;
use crate::utils::compile_static;

/// `\bibitem[optional]{label}`.
static ENTRY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile_static(r"\\bibitem\s*(?:\[[^\]]*\])?\{([^}]*)\}"));

/// Tokens that terminate an entry body. Commented-out markers still count.
static BODY_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| compile_static(r"\\bibitem|\\end\{thebibliography\}"));

/// An entry marker and body before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCandidate {
    /// Citation key exactly as written.
    pub label: String,
    /// Span of the marker including its key.
    pub label_span: Span,
    /// Span of the body following the marker.
    pub body_span: Span,
}

/// Finds every entry marker with its body, commented or not.
///
/// A body runs from the end of its marker to the next `\bibitem` or
/// `\end{thebibliography}`, or to the end of the text if neither follows.
#[must_use]
pub fn find_candidates(text: &str) -> Vec<EntryCandidate> {
    let terminators: Vec<usize> = BODY_TERMINATOR.find_iter(text).map(|m| m.start()).collect();

    ENTRY_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let marker = caps.get(0)?;
            let label = caps.get(1)?;
            let body_start = marker.end();
            let next = terminators.partition_point(|&t| t < body_start);
            let body_end = terminators.get(next).copied().unwrap_or(text.len());
            Some(EntryCandidate {
                label: label.as_str().to_string(),
                label_span: Span::from(marker.range()),
                body_span: Span::new(body_start, body_end),
            })
        })
        .collect()
}

/// Extracts the entries that are neither commented out nor outside the
/// document body.
///
/// Only the `\bibitem` marker is tested against comments. Comment lines that
/// fall between two markers stay part of the preceding entry's body, so
/// rules see their text too.
#[must_use]
pub fn extract_entries(text: &str, comments: &[Span], body: &Span) -> Vec<ReferenceEntry> {
    let candidates = find_candidates(text);
    let total = candidates.len();

    let entries: Vec<ReferenceEntry> = candidates
        .into_iter()
        .filter(|c| {
            if in_comment(&c.label_span, comments) {
                debug!(label = %c.label, "skipping commented-out entry");
                return false;
            }
            if !body.contains(&c.body_span) {
                debug!(label = %c.label, "skipping entry outside document body");
                return false;
            }
            true
        })
        .map(|c| {
            let raw = c.body_span.slice(text).unwrap_or_default();
            ReferenceEntry::new(c.label, raw, c.body_span, c.label_span)
        })
        .collect();

    debug!(found = total, kept = entries.len(), "extracted bibliography entries");
    entries
}

//! Structural region locators for LaTeX source.
//!
//! The locators run in a fixed order: comments first, then the document
//! body (which ignores commented markers), then the bibliography entries
//! (which need both).

pub mod comments;
pub mod doi;
pub mod document;
pub mod entries;

pub use comments::find_comments;
pub use doi::find_last_doi;
pub use document::{find_abstract, find_document_body};
pub use entries::extract_entries;

use crate::entry::ReferenceEntry;
use crate::span::Span;

/// Every region located in one document.
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    /// Comment spans, in document order.
    pub comments: Vec<Span>,
    /// Span of the main document environment.
    pub body: Span,
    /// Span of the abstract environment, if present.
    pub abstract_span: Option<Span>,
    /// Bibliography entries inside the body and outside comments.
    pub entries: Vec<ReferenceEntry>,
}

/// Locates comments, the document body, the abstract and all valid
/// bibliography entries in `text`.
#[must_use]
pub fn scan(text: &str) -> ScannedDocument {
    let comments = find_comments(text);
    let body = find_document_body(text, &comments);
    let abstract_span = find_abstract(text, &body, &comments);
    let entries = extract_entries(text, &comments, &body);

    ScannedDocument {
        comments,
        body,
        abstract_span,
        entries,
    }
}

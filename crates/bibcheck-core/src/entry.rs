//! Bibliography entries and their normalized text.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::span::Span;

/// Whitespace-collapsed reference text with a map back to raw offsets.
///
/// Every run of whitespace becomes a single space and the result is trimmed.
/// `raw_offsets[i]` is the offset, relative to the raw text, of the raw byte
/// that produced normalized byte `i`; a collapsed space maps to the first
/// byte of its whitespace run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    raw_offsets: Vec<usize>,
}

impl NormalizedText {
    /// Normalizes `raw`.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let mut text = String::with_capacity(raw.len());
        let mut raw_offsets = Vec::with_capacity(raw.len());
        let mut pending_space: Option<usize> = None;

        for (offset, ch) in raw.char_indices() {
            if ch.is_whitespace() {
                // Leading whitespace is dropped; interior runs keep their first offset.
                if !text.is_empty() && pending_space.is_none() {
                    pending_space = Some(offset);
                }
                continue;
            }
            if let Some(space_at) = pending_space.take() {
                text.push(' ');
                raw_offsets.push(space_at);
            }
            text.push(ch);
            raw_offsets.extend(offset..offset + ch.len_utf8());
        }

        Self { text, raw_offsets }
    }

    /// The normalized string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Maps a byte range of the normalized string to a byte range of the raw
    /// text it was built from.
    #[must_use]
    pub fn to_raw_range(&self, range: Range<usize>) -> Range<usize> {
        let raw_end_of_text = self.raw_offsets.last().map_or(0, |last| last + 1);
        let start = self
            .raw_offsets
            .get(range.start)
            .copied()
            .unwrap_or(raw_end_of_text);
        if range.end <= range.start {
            return start..start;
        }
        let end = self
            .raw_offsets
            .get(range.end - 1)
            .map_or(raw_end_of_text, |last| last + 1);
        start..end
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A single `\bibitem` entry that survived comment and body filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    /// Citation key exactly as written.
    pub label: String,
    /// Reference body exactly as written.
    pub raw_text: String,
    /// Whitespace-collapsed reference body.
    pub normalized: NormalizedText,
    /// Last DOI-shaped token in the normalized text, or empty.
    pub doi: String,
    /// Absolute span of the last DOI, when one was found.
    pub doi_span: Option<Span>,
    /// Absolute span of the reference body.
    pub body_span: Span,
    /// Absolute span of the `\bibitem{label}` marker.
    pub label_span: Span,
}

impl ReferenceEntry {
    /// Builds an entry from its body text and spans, normalizing the body and
    /// extracting its DOI.
    #[must_use]
    pub fn new(label: impl Into<String>, raw_text: impl Into<String>, body_span: Span, label_span: Span) -> Self {
        let raw_text = raw_text.into();
        let normalized = NormalizedText::new(&raw_text);
        let doi_range = crate::finder::doi::last_doi_range(normalized.as_str());
        let doi = doi_range
            .clone()
            .and_then(|r| normalized.as_str().get(r))
            .unwrap_or_default()
            .to_string();
        let doi_span = doi_range.map(|r| Span::from(normalized.to_raw_range(r)).offset_by(body_span.start));

        Self {
            label: label.into(),
            raw_text,
            normalized,
            doi,
            doi_span,
            body_span,
            label_span,
        }
    }

    /// Builds a detached entry whose body starts at offset 0.
    ///
    /// Useful for checking a single reference outside any document.
    #[must_use]
    pub fn from_text(label: impl Into<String>, raw_text: &str) -> Self {
        let span = Span::new(0, raw_text.len());
        Self::new(label, raw_text, span, Span::default())
    }

    /// The whitespace-collapsed body.
    #[must_use]
    pub fn normalized_text(&self) -> &str {
        self.normalized.as_str()
    }

    /// Converts a range within [`Self::raw_text`] to an absolute span.
    #[must_use]
    pub fn raw_span(&self, range: Range<usize>) -> Span {
        Span::from(range).offset_by(self.body_span.start)
    }

    /// Converts a range within [`Self::normalized_text`] to an absolute span.
    #[must_use]
    pub fn normalized_span(&self, range: Range<usize>) -> Span {
        Span::from(self.normalized.to_raw_range(range)).offset_by(self.body_span.start)
    }

    /// Returns true if the entry carries a DOI.
    #[must_use]
    pub fn has_doi(&self) -> bool {
        !self.doi.is_empty()
    }
}

/// Serializable view of an entry, as exposed to reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySummary {
    /// Citation key.
    pub label: String,
    /// Normalized reference text.
    pub reference: String,
    /// Extracted DOI, or empty.
    pub doi: String,
    /// Absolute span of the reference body.
    pub location: Span,
    /// Absolute span of the marker.
    pub label_location: Span,
}

impl From<&ReferenceEntry> for EntrySummary {
    fn from(entry: &ReferenceEntry) -> Self {
        Self {
            label: entry.label.clone(),
            reference: entry.normalized_text().to_string(),
            doi: entry.doi.clone(),
            location: entry.body_span,
            label_location: entry.label_span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_trims_whitespace() {
        let n = NormalizedText::new("  A.\n   Smith\tet  al.\n");
        assert_eq!(n.as_str(), "A. Smith et al.");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = NormalizedText::new("\n a \t b\r\n\n c ");
        let twice = NormalizedText::new(once.as_str());
        assert_eq!(once.as_str(), twice.as_str());
    }

    #[test]
    fn maps_across_collapsed_whitespace() {
        let raw = "Vol. 5,\n   Issue 2,";
        let n = NormalizedText::new(raw);
        assert_eq!(n.as_str(), "Vol. 5, Issue 2,");
        let range = n.to_raw_range(0..n.as_str().len());
        assert_eq!(&raw[range], raw);
        let issue = n.as_str().find("Issue").unwrap();
        let mapped = n.to_raw_range(issue..issue + 5);
        assert_eq!(&raw[mapped], "Issue");
    }

    #[test]
    fn maps_multibyte_characters() {
        let raw = "Müller  et al.";
        let n = NormalizedText::new(raw);
        let at = n.as_str().find("et").unwrap();
        assert_eq!(&raw[n.to_raw_range(at..at + 2)], "et");
        assert_eq!(&raw[n.to_raw_range(0..3)], "Mü");
    }

    #[test]
    fn empty_range_maps_to_point() {
        let n = NormalizedText::new("  ab");
        assert_eq!(n.to_raw_range(0..0), 2..2);
        assert_eq!(n.to_raw_range(2..2), 4..4);
    }

    #[test]
    fn entry_extracts_doi_with_absolute_span() {
        let raw = " text doi:10.1234/abcd.\n";
        let entry = ReferenceEntry::new("a", raw, Span::new(100, 100 + raw.len()), Span::new(90, 100));
        assert_eq!(entry.doi, "10.1234/abcd.");
        let span = entry.doi_span.unwrap();
        assert_eq!(span, Span::new(100 + 10, 100 + 23));
    }

    #[test]
    fn entry_without_doi() {
        let entry = ReferenceEntry::from_text("a", "no identifier here");
        assert!(!entry.has_doi());
        assert!(entry.doi_span.is_none());
    }
}

//! Byte spans over the raw document text.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A half-open `[start, end)` byte range into the raw document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    ///
    /// `start` must not exceed `end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past end {end}");
        Self { start, end }
    }

    /// Returns true if `inner` lies entirely within this span.
    #[must_use]
    pub fn contains(&self, inner: &Span) -> bool {
        inner.start >= self.start && inner.end <= self.end
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shifts a span relative to `base` into absolute coordinates.
    #[must_use]
    pub fn offset_by(self, base: usize) -> Self {
        Self::new(self.start + base, self.end + base)
    }

    /// Returns the text covered by this span, if it is in bounds.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Returns true if `span` lies inside any of `regions`.
#[must_use]
pub fn contained_in_any(span: &Span, regions: &[Span]) -> bool {
    regions.iter().any(|region| region.contains(span))
}

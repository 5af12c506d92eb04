//! Rule against a comma attached to "et al.".
//!
//! # Detected Patterns
//!
//! - `A. Smith, et al.` (comma before, optionally followed by an italics
//!   opener such as `, \emph{et al.}`)
//! - `\emph{et al.,}` (comma inside the italics group)
//!
//! # Good Patterns
//!
//! ```text
//! A. Smith \emph{et al.}, "Title", ...
//! ```

use std::sync::LazyLock;

use bibcheck_core::utils::compile_static;
use bibcheck_core::{Issue, IssueKind, ReferenceEntry, Rule, Severity, Suggestion};
use regex::Regex;

use crate::patterns::italic_opener;

static COMMA_BEFORE: LazyLock<Regex> =
    LazyLock::new(|| compile_static(concat!(r",\s*", italic_opener!(), r"?\s*et al")));

static COMMA_INSIDE: LazyLock<Regex> =
    LazyLock::new(|| compile_static(concat!(italic_opener!(), r"\s*et al\.?\s*,")));

/// Forbids a comma directly before "et al." or inside its italics group.
#[derive(Debug, Clone)]
pub struct EtAlWithComma {
    /// Severity level.
    pub severity: Severity,
}

impl Default for EtAlWithComma {
    fn default() -> Self {
        Self::new()
    }
}

impl EtAlWithComma {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for EtAlWithComma {
    fn kind(&self) -> IssueKind {
        IssueKind::EtAlWithComma
    }

    fn description(&self) -> &'static str {
        "Forbids a comma attached to et al."
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
        let text = entry.raw_text.as_str();
        let found = [&*COMMA_BEFORE, &*COMMA_INSIDE]
            .into_iter()
            .filter_map(|re| re.find(text))
            .min_by_key(regex::Match::start)?;

        Some(
            self.issue(entry, entry.raw_span(found.range()))
                .with_suggestion(Suggestion::new("Write \\emph{et al.} with no comma inside or before it")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> Option<Issue> {
        EtAlWithComma::new().check(&ReferenceEntry::from_text("berg", text))
    }

    #[test]
    fn test_detects_comma_before() {
        let text = r#" J. S. Berg, et al. "Lattice design", 2019."#;
        let issue = check(text).unwrap();
        assert_eq!(issue.kind, IssueKind::EtAlWithComma);
        assert_eq!(issue.location.slice(text), Some(", et al"));
    }

    #[test]
    fn test_detects_comma_before_italics() {
        assert!(check(r"A. Smith, \emph{et al.}, Title").is_some());
        assert!(check(r"A. Smith,{\it et al.}").is_some());
    }

    #[test]
    fn test_detects_comma_inside_group() {
        let text = r#" J. S. Berg \emph{et al.,} "Lattice...", 2019."#;
        let issue = check(text).unwrap();
        assert_eq!(issue.location.slice(text), Some(r"\emph{et al.,"));
    }

    #[test]
    fn test_allows_trailing_comma_outside_group() {
        assert!(check(r#"J. S. Berg \emph{et al.}, "Lattice...""#).is_none());
        assert!(check("J. S. Berg et al. Lattice").is_none());
    }

    #[test]
    fn test_severity_builder() {
        let issue = EtAlWithComma::new()
            .severity(Severity::Error)
            .check(&ReferenceEntry::from_text("x", "A, et al."))
            .unwrap();
        assert_eq!(issue.severity, Severity::Error);
    }
}

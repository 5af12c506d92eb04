//! Rule against whitespace between `doi:` and the DOI.

use std::sync::LazyLock;

use bibcheck_core::utils::compile_static;
use bibcheck_core::{Issue, IssueKind, ReferenceEntry, Replacement, Rule, Severity, Suggestion};
use regex::Regex;

static DOI_SPACE: LazyLock<Regex> = LazyLock::new(|| compile_static(r"doi:\s10"));

/// Forbids `doi: 10...`.
#[derive(Debug, Clone)]
pub struct DoiContainsSpace {
    /// Severity level.
    pub severity: Severity,
}

impl Default for DoiContainsSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl DoiContainsSpace {
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

impl Rule for DoiContainsSpace {
    fn kind(&self) -> IssueKind {
        IssueKind::DoiContainsSpace
    }

    fn description(&self) -> &'static str {
        "Forbids a space after doi:"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
        let found = DOI_SPACE.find(entry.normalized_text())?;
        let location = entry.normalized_span(found.range());

        Some(self.issue(entry, location).with_suggestion(Suggestion::with_fix(
            "Remove the space after doi:",
            Replacement::new(location, "doi:10"),
        )))
    }
}

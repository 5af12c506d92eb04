//! Rule against DOIs written as `doi.org` web addresses.

use std::sync::LazyLock;

use bibcheck_core::utils::compile_static;
use bibcheck_core::{Issue, IssueKind, ReferenceEntry, Rule, Severity, Suggestion};
use regex::Regex;

static DOI_ORG: LazyLock<Regex> = LazyLock::new(|| compile_static(r"https?://(?:dx\.)?doi\.org"));

/// Forbids `https://doi.org/...` and `http://dx.doi.org/...`.
#[derive(Debug, Clone)]
pub struct DoiIsUrl {
    /// Severity level.
    pub severity: Severity,
}

impl Default for DoiIsUrl {
    fn default() -> Self {
        Self::new()
    }
}

impl DoiIsUrl {
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

impl Rule for DoiIsUrl {
    fn kind(&self) -> IssueKind {
        IssueKind::DoiIsUrl
    }

    fn description(&self) -> &'static str {
        "Forbids DOIs written as doi.org web addresses"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
        let found = DOI_ORG.find(entry.normalized_text())?;
        Some(
            self.issue(entry, entry.normalized_span(found.range()))
                .with_suggestion(Suggestion::new("Drop the resolver address and write \\url{doi:...}")),
        )
    }
}

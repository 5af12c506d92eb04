//! Rule requiring the `doi:` prefix inside `\url`.

use std::sync::LazyLock;

use bibcheck_core::utils::compile_static;
use bibcheck_core::{Issue, IssueKind, ReferenceEntry, Rule, Severity, Suggestion};
use regex::Regex;

static URL_WITHOUT_PREFIX: LazyLock<Regex> = LazyLock::new(|| compile_static(r"\\url\s*\{10\."));

/// Forbids `\url{10.` without `doi:`.
#[derive(Debug, Clone)]
pub struct NoDoiPrefix {
    /// Severity level.
    pub severity: Severity,
}

impl Default for NoDoiPrefix {
    fn default() -> Self {
        Self::new()
    }
}

impl NoDoiPrefix {
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

impl Rule for NoDoiPrefix {
    fn kind(&self) -> IssueKind {
        IssueKind::NoDoiPrefix
    }

    fn description(&self) -> &'static str {
        "Requires the doi: prefix inside \\url{}"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
        let found = URL_WITHOUT_PREFIX.find(entry.normalized_text())?;
        Some(
            self.issue(entry, entry.normalized_span(found.range()))
                .with_suggestion(Suggestion::new("Write \\url{doi:10....}")),
        )
    }
}

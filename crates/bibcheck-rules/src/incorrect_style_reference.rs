//! Rule against references exported in a foreign citation style.
//!
//! Two generator outputs are recognised, tried in order:
//!
//! - a page or article range followed by a parenthesised year, as in
//!   `Phys. Rev. Lett. 131, 161802 (2023)`
//! - the broken export tail `: N. p., 2019. Web.`

use std::sync::LazyLock;

use bibcheck_core::utils::compile_static;
use bibcheck_core::{Issue, IssueKind, ReferenceEntry, Rule, Severity, Suggestion};
use regex::Regex;

static FOREIGN_STYLES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        compile_static(r"\d+[, -]+?\d+ \(\d{4}\)"),
        compile_static(r": N\. p\., \d{4}\. Web\."),
    ]
});

/// Flags references that look generated in another citation style.
#[derive(Debug, Clone)]
pub struct IncorrectStyleReference {
    /// Severity level.
    pub severity: Severity,
}

impl Default for IncorrectStyleReference {
    fn default() -> Self {
        Self::new()
    }
}

impl IncorrectStyleReference {
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

impl Rule for IncorrectStyleReference {
    fn kind(&self) -> IssueKind {
        IssueKind::IncorrectStyleReference
    }

    fn description(&self) -> &'static str {
        "Flags references generated in a non-JACoW citation style"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
        let text = entry.normalized_text();
        let found = FOREIGN_STYLES.iter().find_map(|re| re.find(text))?;

        Some(
            self.issue(entry, entry.normalized_span(found.range()))
                .with_suggestion(Suggestion::new(
                    "Regenerate the reference at https://refs.jacow.org/",
                )),
        )
    }
}

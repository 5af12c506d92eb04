//! Rule requiring DOIs to be wrapped in `\url`.
//!
//! # Detected Patterns
//!
//! - `doi:10.18429/JACoW-IPAC2023-TUPM055` with no surrounding `\url`
//!
//! # Good Patterns
//!
//! ```text
//! \url{doi:10.18429/JACoW-IPAC2023-TUPM055}
//! \url|doi:10.18429/JACoW-IPAC2023-TUPM055|
//! ```
//!
//! Any of `{ " | # ! '` is accepted as the `\url` delimiter.

use std::sync::LazyLock;

use bibcheck_core::utils::{compile_static, first_match_outside, match_spans};
use bibcheck_core::{Issue, IssueKind, ReferenceEntry, Rule, Severity, Suggestion};
use regex::Regex;

static DOI: LazyLock<Regex> = LazyLock::new(|| compile_static(r"doi:\s?10\."));

static URL_WRAPPED_DOI: LazyLock<Regex> =
    LazyLock::new(|| compile_static(r#"\\url\s*[{"|#!'](?:doi:\s?)?10\."#));

/// Requires `doi:10.` to appear inside a `\url` command.
#[derive(Debug, Clone)]
pub struct DoiNotWrapped {
    /// Severity level.
    pub severity: Severity,
}

impl Default for DoiNotWrapped {
    fn default() -> Self {
        Self::new()
    }
}

impl DoiNotWrapped {
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

impl Rule for DoiNotWrapped {
    fn kind(&self) -> IssueKind {
        IssueKind::DoiNotWrapped
    }

    fn description(&self) -> &'static str {
        "Requires DOIs to be wrapped in \\url{}"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
        let text = entry.raw_text.as_str();
        let wrapped = match_spans(&URL_WRAPPED_DOI, text);
        let bare = first_match_outside(&DOI, text, &wrapped)?;

        Some(
            self.issue(entry, entry.raw_span(bare.range()))
                .with_suggestion(Suggestion::new("Wrap the DOI as \\url{doi:...}")),
        )
    }
}

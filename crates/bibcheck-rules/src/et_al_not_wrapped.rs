//! Rule requiring "et al." to be set in italics.
//!
//! # Rationale
//!
//! The house style prints "et al." in italics. Any of the usual LaTeX
//! idioms is accepted, with free whitespace between the opener and the
//! text.
//!
//! # Detected Patterns
//!
//! - `J. S. Berg et al. "Lattice..."`
//!
//! # Good Patterns
//!
//! ```text
//! \emph{et al.}  \textit{et al.}  \it{et al.}  \em{et al.}  \itshape{et al.}
//! {\it et al.}   {\em et al.}     {\itshape et al.}
//! ```

use std::sync::LazyLock;

use bibcheck_core::utils::{compile_static, first_match_outside, match_spans};
use bibcheck_core::{Issue, IssueKind, ReferenceEntry, Rule, Severity, Suggestion};
use regex::Regex;

use crate::patterns::italic_opener;

static ET_AL: LazyLock<Regex> = LazyLock::new(|| compile_static(r"et al\."));

static ITALIC_ET_AL: LazyLock<Regex> =
    LazyLock::new(|| compile_static(concat!(italic_opener!(), r"\s*et al\.")));

/// Requires every "et al." to be wrapped in an italics command or group.
#[derive(Debug, Clone)]
pub struct EtAlNotWrapped {
    /// Severity level.
    pub severity: Severity,
}

impl Default for EtAlNotWrapped {
    fn default() -> Self {
        Self::new()
    }
}

impl EtAlNotWrapped {
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

impl Rule for EtAlNotWrapped {
    fn kind(&self) -> IssueKind {
        IssueKind::EtAlNotWrapped
    }

    fn description(&self) -> &'static str {
        "Requires et al. to be set in italics"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
        let text = entry.raw_text.as_str();
        let wrapped = match_spans(&ITALIC_ET_AL, text);
        let bare = first_match_outside(&ET_AL, text, &wrapped)?;

        Some(
            self.issue(entry, entry.raw_span(bare.range()))
                .with_suggestion(Suggestion::new("Replace with \\emph{et al.}")),
        )
    }
}

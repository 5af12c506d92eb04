//! Rule for the "vol. N, no. N" house style.
//!
//! # Detected Patterns
//!
//! - `Vol. 12, Issue 3,`
//!
//! # Good Patterns
//!
//! ```text
//! vol. 12, no. 3,
//! ```

use std::sync::LazyLock;

use bibcheck_core::utils::compile_static;
use bibcheck_core::{Issue, IssueKind, ReferenceEntry, Replacement, Rule, Severity, Suggestion};
use regex::Regex;

static VOLUME_ISSUE: LazyLock<Regex> =
    LazyLock::new(|| compile_static(r"Vol\. (\d+), Issue (\d+),"));

/// Forbids `Vol. N, Issue N,`.
#[derive(Debug, Clone)]
pub struct VolumeIssue {
    /// Severity level.
    pub severity: Severity,
}

impl Default for VolumeIssue {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeIssue {
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

impl Rule for VolumeIssue {
    fn kind(&self) -> IssueKind {
        IssueKind::VolumeIssue
    }

    fn description(&self) -> &'static str {
        "Requires vol. N, no. N instead of Vol. N, Issue N"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
        let caps = VOLUME_ISSUE.captures(entry.normalized_text())?;
        let found = caps.get(0)?;
        let location = entry.normalized_span(found.range());
        let fixed = format!("vol. {}, no. {},", &caps[1], &caps[2]);

        Some(self.issue(entry, location).with_suggestion(Suggestion::with_fix(
            format!("Write {fixed}"),
            Replacement::new(location, fixed),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> Option<Issue> {
        VolumeIssue::new().check(&ReferenceEntry::from_text("ref", text))
    }

    #[test]
    fn test_detects_volume_issue() {
        let text = "A. Author, Title, Nucl. Instrum. Methods, Vol. 12, Issue 3, pp. 1-5, 2020.";
        let issue = check(text).unwrap();
        assert_eq!(issue.location.slice(text), Some("Vol. 12, Issue 3,"));
        let fix = issue.suggestion.unwrap().replacement.unwrap();
        assert_eq!(fix.new_text, "vol. 12, no. 3,");
    }

    #[test]
    fn test_detects_across_line_break() {
        let text = "Journal, Vol. 12,\n  Issue 3, 2020.";
        let issue = check(text).unwrap();
        assert_eq!(issue.location.slice(text), Some("Vol. 12,\n  Issue 3,"));
    }

    #[test]
    fn test_allows_house_style() {
        assert!(check("Journal, vol. 12, no. 3, pp. 1-5, 2020.").is_none());
    }
}

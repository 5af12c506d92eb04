//! Rule trait for defining reference style rules.

use crate::entry::ReferenceEntry;
use crate::span::Span;
use crate::types::{Issue, IssueKind, Severity};

/// A style rule evaluated against one bibliography entry.
///
/// Rules are independent of each other: each inspects the entry on its own
/// and reports at most one issue (its first match). Locations must be
/// absolute; use [`ReferenceEntry::raw_span`] or
/// [`ReferenceEntry::normalized_span`] to convert match offsets.
///
/// # Example
///
/// ```ignore
/// use bibcheck_core::{IssueKind, ReferenceEntry, Rule, Issue};
///
/// pub struct NoTodo;
///
/// impl Rule for NoTodo {
///     fn kind(&self) -> IssueKind { IssueKind::IncorrectStyleReference }
///
///     fn check(&self, entry: &ReferenceEntry) -> Option<Issue> {
///         let at = entry.raw_text.find("TODO")?;
///         Some(self.issue(entry, entry.raw_span(at..at + 4)))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// The kind of issue this rule reports.
    fn kind(&self) -> IssueKind;

    /// Returns the kebab-case name of this rule (e.g., "doi-is-url").
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the rule code (e.g., "BIB006").
    fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for issues from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks a single entry and returns the first issue found, if any.
    fn check(&self, entry: &ReferenceEntry) -> Option<Issue>;

    /// Builds an issue of this rule's kind for `entry` at `location`.
    fn issue(&self, entry: &ReferenceEntry, location: Span) -> Issue {
        Issue::new(self.kind(), self.default_severity(), entry.label.clone(), location)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

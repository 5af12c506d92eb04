//! Core types for reference issues and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::context::LineIndex;
use crate::entry::EntrySummary;
use crate::span::Span;

/// Number of issues above which a report would be handed to an external
/// summarizer before being shown to an author.
pub const SUMMARY_THRESHOLD: usize = 3;

/// Severity level for reference issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// The kind of problem found in a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// A comma attached to "et al.".
    EtAlWithComma,
    /// "et al." not set in italics.
    EtAlNotWrapped,
    /// `doi: 10...` with a space after the colon.
    DoiContainsSpace,
    /// A bare `doi:10.` outside `\url`.
    DoiNotWrapped,
    /// `\url{10.` without the `doi:` prefix.
    NoDoiPrefix,
    /// DOI written as a `doi.org` web address.
    DoiIsUrl,
    /// "Vol. N, Issue N," instead of "vol. N, no. N".
    VolumeIssue,
    /// Reference generated in a foreign citation style.
    IncorrectStyleReference,
    /// DOI resolves only without its trailing period.
    DoiTrailingPeriod,
    /// DOI resolves only without its trailing parenthesis.
    DoiInParenthesis,
    /// DOI does not resolve.
    DoiNotFound,
}

impl IssueKind {
    /// All kinds, in rule registry order.
    pub const ALL: [Self; 11] = [
        Self::EtAlWithComma,
        Self::EtAlNotWrapped,
        Self::DoiContainsSpace,
        Self::DoiNotWrapped,
        Self::NoDoiPrefix,
        Self::DoiIsUrl,
        Self::VolumeIssue,
        Self::IncorrectStyleReference,
        Self::DoiTrailingPeriod,
        Self::DoiInParenthesis,
        Self::DoiNotFound,
    ];

    /// Returns true for kinds produced by the DOI-existence check.
    #[must_use]
    pub fn is_doi_existence(self) -> bool {
        matches!(
            self,
            Self::DoiTrailingPeriod | Self::DoiInParenthesis | Self::DoiNotFound
        )
    }

    /// Stable identifier (e.g., `ET_AL_NOT_WRAPPED`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EtAlWithComma => "ET_AL_WITH_COMMA",
            Self::EtAlNotWrapped => "ET_AL_NOT_WRAPPED",
            Self::DoiContainsSpace => "DOI_CONTAINS_SPACE",
            Self::DoiNotWrapped => "DOI_NOT_WRAPPED",
            Self::NoDoiPrefix => "NO_DOI_PREFIX",
            Self::DoiIsUrl => "DOI_IS_URL",
            Self::VolumeIssue => "VOLUME_ISSUE",
            Self::IncorrectStyleReference => "INCORRECT_STYLE_REFERENCE",
            Self::DoiTrailingPeriod => "DOI_TRAILING_PERIOD",
            Self::DoiInParenthesis => "DOI_IN_PARENTHESIS",
            Self::DoiNotFound => "DOI_NOT_FOUND",
        }
    }

    /// Rule code (e.g., "BIB002").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EtAlWithComma => "BIB001",
            Self::EtAlNotWrapped => "BIB002",
            Self::DoiContainsSpace => "BIB003",
            Self::DoiNotWrapped => "BIB004",
            Self::NoDoiPrefix => "BIB005",
            Self::DoiIsUrl => "BIB006",
            Self::VolumeIssue => "BIB007",
            Self::IncorrectStyleReference => "BIB008",
            Self::DoiTrailingPeriod => "BIB101",
            Self::DoiInParenthesis => "BIB102",
            Self::DoiNotFound => "BIB103",
        }
    }

    /// Kebab-case rule name (e.g., "et-al-not-wrapped").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EtAlWithComma => "et-al-with-comma",
            Self::EtAlNotWrapped => "et-al-not-wrapped",
            Self::DoiContainsSpace => "doi-contains-space",
            Self::DoiNotWrapped => "doi-not-wrapped",
            Self::NoDoiPrefix => "no-doi-prefix",
            Self::DoiIsUrl => "doi-is-url",
            Self::VolumeIssue => "volume-issue",
            Self::IncorrectStyleReference => "incorrect-style-reference",
            Self::DoiTrailingPeriod => "doi-trailing-period",
            Self::DoiInParenthesis => "doi-in-parenthesis",
            Self::DoiNotFound => "doi-not-found",
        }
    }

    /// Human-readable description shown to authors.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::EtAlWithComma => {
                "et al. has a comma attached to it, which is incorrect. Please remove the comma."
            }
            Self::EtAlNotWrapped => {
                "et al. is not wrapped in a macro to make it italic. Please use \\emph{et al.} instead of et al."
            }
            Self::DoiContainsSpace => "DOI contains a space after the colon. Please remove the space.",
            Self::DoiNotWrapped => {
                "DOI not wrapped in \\url{} macro. Please use \\url{doi:10.18429/JACoW-IPAC2023-XXXX} instead of doi:10.18429/JACoW-IPAC2023-XXXX"
            }
            Self::NoDoiPrefix => {
                "DOI does not contain \"doi:\" prefix. It should appear like this \\url{doi:10.18429/JACoW-IPAC2023-XXXX}"
            }
            Self::DoiIsUrl => {
                "DOI is written as a web URL (including https://doi.org/) which is incorrect. Remove the https://doi.org/, and write it as per this example. \\url{doi:10.18429/JACoW-IPAC2023-XXXX}"
            }
            Self::VolumeIssue => {
                "JACoW references use vol. X and no. X. You have used Vol. X, Issue X, which is incorrect. Please correct your reference style. You can generate correctly formatted references at https://refs.jacow.org/ or refer to the JACoW reference style guide at https://www.jacow.org/Authors/FormattingCitations"
            }
            Self::IncorrectStyleReference => {
                "Reference does not appear to be in the JACoW style, please adjust your reference style to be consistent with the JACoW style reference, please see https://www.jacow.org/Authors/FormattingCitations"
            }
            Self::DoiTrailingPeriod => {
                "This DOI ends with a period, which is not correct for this specific DOI. Please remove the period."
            }
            Self::DoiInParenthesis => {
                "Do not use parenthesis e.g () around your DOI. Instead wrap it with a \\url{} command."
            }
            Self::DoiNotFound => "The DOI does not appear to be valid. Please check the DOI.",
        }
    }

    /// Looks up a kind by rule name, code or identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name || k.code() == name || k.as_str() == name)
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suggested fix for an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
    /// Optional automatic replacement.
    pub replacement: Option<Replacement>,
}

impl Suggestion {
    /// Creates a new suggestion without automatic fix.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    /// Creates a new suggestion with automatic fix.
    #[must_use]
    pub fn with_fix(message: impl Into<String>, replacement: Replacement) -> Self {
        Self {
            message: message.into(),
            replacement: Some(replacement),
        }
    }
}

/// An automatic text replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Absolute span to replace.
    pub location: Span,
    /// New text to insert.
    pub new_text: String,
}

impl Replacement {
    /// Creates a new replacement.
    #[must_use]
    pub fn new(location: Span, new_text: impl Into<String>) -> Self {
        Self {
            location,
            new_text: new_text.into(),
        }
    }
}

/// An issue found in one reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// What was detected.
    pub kind: IssueKind,
    /// Label of the owning entry.
    pub label: String,
    /// Absolute location in the document.
    pub location: Span,
    /// Severity of this issue.
    pub severity: Severity,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Issue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(kind: IssueKind, severity: Severity, label: impl Into<String>, location: Span) -> Self {
        Self {
            kind,
            label: label.into(),
            location,
            severity,
            suggestion: None,
        }
    }

    /// Adds a suggestion to this issue.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {} ({})",
            self.location,
            self.severity,
            self.kind.code(),
            self.kind,
            self.label.trim()
        )
    }
}

/// Converts an Issue to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct IssueDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Issue> for IssueDiagnostic {
    fn from(issue: &Issue) -> Self {
        Self {
            message: format!("[{}] {}", issue.kind.code(), issue.kind.description()),
            help: issue.suggestion.as_ref().map(|s| match &s.replacement {
                Some(r) => format!("{} (suggested: {})", s.message, r.new_text),
                None => s.message.clone(),
            }),
            span: SourceSpan::from((issue.location.start, issue.location.len())),
            label_message: format!("{} in {}", issue.kind.name(), issue.label.trim()),
        }
    }
}

/// Issues found in one document.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// File the document was read from (or the caller-supplied name).
    pub file: PathBuf,
    /// Number of bibliography entries checked.
    pub entries_checked: usize,
    /// The entries that were checked, in document order.
    #[serde(default)]
    pub entries: Vec<EntrySummary>,
    /// Issues, grouped by entry in document order.
    pub issues: Vec<Issue>,
    /// Line index of the document text.
    #[serde(skip)]
    pub lines: LineIndex,
}

impl DocumentReport {
    /// Returns true if nothing was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if the report is long enough that it would be summarized
    /// before being shown to an author.
    #[must_use]
    pub fn needs_summary(&self) -> bool {
        self.issues.len() > SUMMARY_THRESHOLD
    }

    /// Renders the author-facing report: one block per affected entry, or
    /// "No issues found".
    #[must_use]
    pub fn render(&self) -> String {
        use std::fmt::Write;

        if self.issues.is_empty() {
            return "No issues found".to_string();
        }

        let mut output = String::new();
        let mut current_label: Option<&str> = None;
        for (index, issue) in self.issues.iter().enumerate() {
            let label = issue.label.trim();
            if current_label != Some(label) {
                let _ = writeln!(output, "\nIssue found in reference {label}:");
                current_label = Some(label);
            }
            let _ = writeln!(output, "[{}]: {}", index + 1, issue.kind.description());
            if let Some(replacement) = issue.suggestion.as_ref().and_then(|s| s.replacement.as_ref()) {
                let prefix = if issue.kind.is_doi_existence() {
                    "Suggested DOI"
                } else {
                    "Suggested"
                };
                let _ = writeln!(output, "{prefix}: {}", replacement.new_text);
            }
        }
        output
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// One report per checked document.
    pub documents: Vec<DocumentReport>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over every issue in every document.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.documents.iter().flat_map(|d| d.issues.iter())
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues().any(|i| i.severity == Severity::Error)
    }

    /// Counts issues by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| self.issues().filter(|i| i.severity == severity).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Checks if any issues meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.issues().any(|i| i.severity >= severity)
    }

    /// Adds a document report.
    pub fn push(&mut self, report: DocumentReport) {
        self.documents.push(report);
        self.files_checked += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(kind: IssueKind, severity: Severity, label: &str) -> Issue {
        Issue::new(kind, severity, label, Span::new(4, 10))
    }

    fn report(issues: Vec<Issue>) -> DocumentReport {
        DocumentReport {
            file: PathBuf::from("paper.tex"),
            entries_checked: 2,
            entries: Vec::new(),
            issues,
            lines: LineIndex::new("line1\nline2 with text\n"),
        }
    }

    #[test]
    fn kind_lookup_by_name_code_and_identifier() {
        assert_eq!(IssueKind::from_name("doi-is-url"), Some(IssueKind::DoiIsUrl));
        assert_eq!(IssueKind::from_name("BIB002"), Some(IssueKind::EtAlNotWrapped));
        assert_eq!(IssueKind::from_name("VOLUME_ISSUE"), Some(IssueKind::VolumeIssue));
        assert_eq!(IssueKind::from_name("nope"), None);
    }

    #[test]
    fn kind_codes_are_unique() {
        let mut codes: Vec<&str> = IssueKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), IssueKind::ALL.len());
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn empty_report_says_no_issues() {
        assert_eq!(report(vec![]).render(), "No issues found");
    }

    #[test]
    fn render_groups_by_entry() {
        let doi = make_issue(IssueKind::DoiTrailingPeriod, Severity::Error, "b").with_suggestion(
            Suggestion::with_fix(
                IssueKind::DoiTrailingPeriod.description(),
                Replacement::new(Span::new(4, 10), "10.1000/1"),
            ),
        );
        let rendered = report(vec![
            make_issue(IssueKind::EtAlNotWrapped, Severity::Warning, "a"),
            make_issue(IssueKind::DoiIsUrl, Severity::Warning, "a"),
            doi,
        ])
        .render();
        insta::assert_snapshot!(rendered.trim(), @r###"
        Issue found in reference a:
        [1]: et al. is not wrapped in a macro to make it italic. Please use \emph{et al.} instead of et al.
        [2]: DOI is written as a web URL (including https://doi.org/) which is incorrect. Remove the https://doi.org/, and write it as per this example. \url{doi:10.18429/JACoW-IPAC2023-XXXX}

        Issue found in reference b:
        [3]: This DOI ends with a period, which is not correct for this specific DOI. Please remove the period.
        Suggested DOI: 10.1000/1
        "###);
    }

    #[test]
    fn style_fix_is_not_labelled_as_doi() {
        let volume = make_issue(IssueKind::VolumeIssue, Severity::Warning, "v").with_suggestion(
            Suggestion::with_fix(
                "Use vol. and no.",
                Replacement::new(Span::new(4, 10), "vol. 12, no. 3,"),
            ),
        );
        let rendered = report(vec![volume]).render();
        insta::assert_snapshot!(rendered.trim(), @r###"
        Issue found in reference v:
        [1]: JACoW references use vol. X and no. X. You have used Vol. X, Issue X, which is incorrect. Please correct your reference style. You can generate correctly formatted references at https://refs.jacow.org/ or refer to the JACoW reference style guide at https://www.jacow.org/Authors/FormattingCitations
        Suggested: vol. 12, no. 3,
        "###);
        assert!(!rendered.contains("Suggested DOI"));
    }

    #[test]
    fn needs_summary_above_threshold() {
        let issues = vec![make_issue(IssueKind::VolumeIssue, Severity::Warning, "a"); SUMMARY_THRESHOLD];
        assert!(!report(issues.clone()).needs_summary());
        let mut more = issues;
        more.push(make_issue(IssueKind::DoiIsUrl, Severity::Warning, "a"));
        assert!(report(more).needs_summary());
    }

    #[test]
    fn result_counts_by_severity() {
        let mut result = LintResult::new();
        result.push(report(vec![
            make_issue(IssueKind::DoiNotFound, Severity::Error, "a"),
            make_issue(IssueKind::VolumeIssue, Severity::Warning, "a"),
        ]));
        assert_eq!(result.count_by_severity(), (1, 1, 0));
        assert!(result.has_errors());
        assert!(result.has_violations_at(Severity::Warning));
        assert_eq!(result.files_checked, 1);
    }

    #[test]
    fn diagnostic_carries_span_and_help() {
        let issue = make_issue(IssueKind::DoiContainsSpace, Severity::Warning, "x")
            .with_suggestion(Suggestion::new("remove the space"));
        let diag = IssueDiagnostic::from(&issue);
        assert_eq!(diag.span, SourceSpan::from((4, 6)));
        assert_eq!(diag.help.as_deref(), Some("remove the space"));
    }
}

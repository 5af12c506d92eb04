//! DOI existence checking with corrective trims.

use std::sync::Arc;

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::doi::resolver::{DoiResolver, ResolverError};
use crate::entry::ReferenceEntry;
use crate::types::{Issue, IssueKind, Replacement, Severity, Suggestion};

/// Default number of concurrent lookups.
pub const DEFAULT_WORKERS: usize = 8;

/// Why a DOI was judged invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The DOI resolves once its trailing periods are removed.
    TrailingPeriod,
    /// The DOI resolves once its trailing parentheses are removed.
    WrappedInParenthesis,
    /// Neither the DOI nor any correction resolves.
    NotFound,
}

impl InvalidReason {
    /// Issue kind reported for this reason.
    #[must_use]
    pub fn kind(self) -> IssueKind {
        match self {
            Self::TrailingPeriod => IssueKind::DoiTrailingPeriod,
            Self::WrappedInParenthesis => IssueKind::DoiInParenthesis,
            Self::NotFound => IssueKind::DoiNotFound,
        }
    }

    /// Severity reported when no override is configured.
    #[must_use]
    pub fn default_severity(self) -> Severity {
        match self {
            Self::TrailingPeriod | Self::WrappedInParenthesis => Severity::Warning,
            Self::NotFound => Severity::Error,
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrailingPeriod => write!(f, "trailing period"),
            Self::WrappedInParenthesis => write!(f, "wrapped in parenthesis"),
            Self::NotFound => write!(f, "DOI not found"),
        }
    }
}

/// Outcome of checking one DOI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoiVerdict {
    /// The DOI resolves, or there was nothing to check.
    Confirmed,
    /// No answer could be obtained; never reported to authors.
    Unconfirmed,
    /// The resolver answered and the DOI as written does not resolve.
    Invalid {
        /// Why the DOI is invalid.
        reason: InvalidReason,
        /// Corrected DOI that does resolve, if one was found.
        suggestion: Option<String>,
    },
}

impl DoiVerdict {
    /// Converts the verdict into an author-facing issue for `entry`.
    ///
    /// Only [`DoiVerdict::Invalid`] produces an issue.
    #[must_use]
    pub fn into_issue(self, entry: &ReferenceEntry, severity: Severity) -> Option<Issue> {
        let Self::Invalid { reason, suggestion } = self else {
            return None;
        };
        let location = entry.doi_span.unwrap_or(entry.body_span);
        let issue = Issue::new(reason.kind(), severity, entry.label.clone(), location);

        Some(match suggestion {
            Some(corrected) => issue.with_suggestion(Suggestion::with_fix(
                format!("Replace the DOI with {corrected} ({reason})"),
                Replacement::new(location, corrected),
            )),
            None => issue.with_suggestion(Suggestion::new(reason.to_string())),
        })
    }
}

/// A single textual correction tried when a DOI does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimPolicy {
    /// Strip trailing `.` characters.
    TrailingPeriod,
    /// Strip trailing `)` characters.
    TrailingParenthesis,
}

impl TrimPolicy {
    /// Applies the correction.
    #[must_use]
    pub fn apply(self, doi: &str) -> &str {
        match self {
            Self::TrailingPeriod => doi.trim_end_matches('.'),
            Self::TrailingParenthesis => doi.trim_end_matches(')'),
        }
    }
}

/// Corrections in the order they are tried; the first that resolves wins.
pub const CORRECTIONS: [(TrimPolicy, InvalidReason); 2] = [
    (TrimPolicy::TrailingPeriod, InvalidReason::TrailingPeriod),
    (TrimPolicy::TrailingParenthesis, InvalidReason::WrappedInParenthesis),
];

fn unconfirmed(err: &ResolverError) -> DoiVerdict {
    warn!("could not confirm DOI: {err}");
    DoiVerdict::Unconfirmed
}

/// Checks that `doi` resolves, trying each of [`CORRECTIONS`] once if it
/// does not. An empty DOI is [`DoiVerdict::Confirmed`].
///
/// Any resolver failure yields [`DoiVerdict::Unconfirmed`].
pub fn check_doi(resolver: &dyn DoiResolver, doi: &str) -> DoiVerdict {
    if doi.is_empty() {
        return DoiVerdict::Confirmed;
    }

    match resolver.resolve(doi) {
        Ok(true) => return DoiVerdict::Confirmed,
        Ok(false) => debug!(doi, "DOI does not resolve, trying corrections"),
        Err(err) => return unconfirmed(&err),
    }

    for (policy, reason) in CORRECTIONS {
        let trimmed = policy.apply(doi);
        if trimmed == doi || trimmed.is_empty() {
            continue;
        }
        match resolver.resolve(trimmed) {
            Ok(true) => {
                return DoiVerdict::Invalid {
                    reason,
                    suggestion: Some(trimmed.to_string()),
                }
            }
            Ok(false) => {}
            Err(err) => return unconfirmed(&err),
        }
    }

    DoiVerdict::Invalid {
        reason: InvalidReason::NotFound,
        suggestion: None,
    }
}

/// Checks the DOI of `entry`.
pub fn check_doi_exists(resolver: &dyn DoiResolver, entry: &ReferenceEntry) -> DoiVerdict {
    check_doi(resolver, &entry.doi)
}

/// Errors building a [`DoiChecker`].
#[derive(Debug, thiserror::Error)]
pub enum DoiCheckError {
    /// The worker pool could not be created.
    #[error("failed to build DOI worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Checks many entries concurrently on a bounded worker pool.
pub struct DoiChecker {
    resolver: Arc<dyn DoiResolver>,
    pool: rayon::ThreadPool,
}

impl std::fmt::Debug for DoiChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoiChecker")
            .field("workers", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}

impl DoiChecker {
    /// Creates a checker using at most `workers` concurrent lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be created.
    pub fn new(resolver: Arc<dyn DoiResolver>, workers: usize) -> Result<Self, DoiCheckError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("doi-check-{i}"))
            .build()?;
        Ok(Self { resolver, pool })
    }

    /// Checks a single entry on the calling thread.
    #[must_use]
    pub fn check(&self, entry: &ReferenceEntry) -> DoiVerdict {
        check_doi_exists(self.resolver.as_ref(), entry)
    }

    /// Checks every entry, returning verdicts in entry order.
    ///
    /// Checks that have not started when `cancel` fires are reported as
    /// [`DoiVerdict::Unconfirmed`]; finished verdicts are kept. A lookup
    /// already in flight is not interrupted and runs until the resolver
    /// returns or its own timeout expires.
    #[must_use]
    pub fn check_all(&self, entries: &[ReferenceEntry], cancel: &CancellationToken) -> Vec<DoiVerdict> {
        self.pool.install(|| {
            entries
                .par_iter()
                .map(|entry| {
                    if cancel.is_cancelled() {
                        debug!(label = %entry.label, "DOI check cancelled");
                        return DoiVerdict::Unconfirmed;
                    }
                    self.check(entry)
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Resolves a fixed set of DOIs and records every lookup.
    struct FixedResolver {
        known: HashSet<&'static str>,
        offline: bool,
        lookups: Mutex<Vec<String>>,
    }

    impl FixedResolver {
        fn new(known: &[&'static str]) -> Self {
            Self {
                known: known.iter().copied().collect(),
                offline: false,
                lookups: Mutex::new(Vec::new()),
            }
        }

        fn offline() -> Self {
            Self {
                offline: true,
                ..Self::new(&[])
            }
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    impl DoiResolver for FixedResolver {
        fn resolve(&self, doi: &str) -> Result<bool, ResolverError> {
            self.lookups.lock().unwrap().push(doi.to_string());
            if self.offline {
                return Err(ResolverError::Unavailable {
                    doi: doi.to_string(),
                    message: "offline".to_string(),
                });
            }
            Ok(self.known.contains(doi))
        }
    }

    #[test]
    fn empty_doi_is_not_checked() {
        let resolver = FixedResolver::new(&[]);
        assert_eq!(check_doi(&resolver, ""), DoiVerdict::Confirmed);
        assert!(resolver.lookups().is_empty());
    }

    #[test]
    fn resolving_doi_is_confirmed() {
        let resolver = FixedResolver::new(&["10.1000/182"]);
        assert_eq!(check_doi(&resolver, "10.1000/182"), DoiVerdict::Confirmed);
    }

    #[test]
    fn trailing_period_is_suggested() {
        let resolver = FixedResolver::new(&["10.1103/PhysRevLett.131.161802"]);
        let verdict = check_doi(&resolver, "10.1103/PhysRevLett.131.161802.");
        assert_eq!(
            verdict,
            DoiVerdict::Invalid {
                reason: InvalidReason::TrailingPeriod,
                suggestion: Some("10.1103/PhysRevLett.131.161802".to_string()),
            }
        );
        assert_eq!(resolver.lookups().len(), 2);
    }

    #[test]
    fn trailing_parenthesis_is_suggested_after_period() {
        let resolver = FixedResolver::new(&["10.1000/abc"]);
        let verdict = check_doi(&resolver, "10.1000/abc)");
        assert_eq!(
            verdict,
            DoiVerdict::Invalid {
                reason: InvalidReason::WrappedInParenthesis,
                suggestion: Some("10.1000/abc".to_string()),
            }
        );
        // No trailing period, so the period trim is skipped without a lookup.
        assert_eq!(resolver.lookups(), vec!["10.1000/abc)", "10.1000/abc"]);
    }

    #[test]
    fn unknown_doi_is_not_found() {
        let resolver = FixedResolver::new(&[]);
        let verdict = check_doi(&resolver, "10.1000/nothing.");
        assert_eq!(
            verdict,
            DoiVerdict::Invalid {
                reason: InvalidReason::NotFound,
                suggestion: None,
            }
        );
    }

    #[test]
    fn transport_failure_is_unconfirmed() {
        let resolver = FixedResolver::offline();
        assert_eq!(check_doi(&resolver, "10.1000/182."), DoiVerdict::Unconfirmed);
        assert_eq!(resolver.lookups().len(), 1);
    }

    #[test]
    fn invalid_verdict_becomes_issue_at_doi() {
        let raw = " x doi:10.1000/182.";
        let entry = ReferenceEntry::new("ref", raw, Span::new(10, 10 + raw.len()), Span::new(0, 10));
        let issue = DoiVerdict::Invalid {
            reason: InvalidReason::TrailingPeriod,
            suggestion: Some("10.1000/182".to_string()),
        }
        .into_issue(&entry, Severity::Error)
        .unwrap();
        assert_eq!(issue.kind, IssueKind::DoiTrailingPeriod);
        assert_eq!(issue.location, entry.doi_span.unwrap());
        let replacement = issue.suggestion.unwrap().replacement.unwrap();
        assert_eq!(replacement.new_text, "10.1000/182");
    }

    #[test]
    fn confirmed_and_unconfirmed_produce_no_issue() {
        let entry = ReferenceEntry::from_text("a", "doi:10.1000/182");
        assert!(DoiVerdict::Confirmed.into_issue(&entry, Severity::Error).is_none());
        assert!(DoiVerdict::Unconfirmed.into_issue(&entry, Severity::Error).is_none());
    }

    #[test]
    fn check_all_preserves_order() {
        let resolver = Arc::new(FixedResolver::new(&["10.1000/1"]));
        let checker = DoiChecker::new(resolver, 4).unwrap();
        let entries = vec![
            ReferenceEntry::from_text("a", "doi:10.1000/1"),
            ReferenceEntry::from_text("b", "doi:10.1000/2"),
            ReferenceEntry::from_text("c", "no doi"),
        ];
        let verdicts = checker.check_all(&entries, &CancellationToken::new());
        assert_eq!(verdicts[0], DoiVerdict::Confirmed);
        assert!(matches!(verdicts[1], DoiVerdict::Invalid { reason: InvalidReason::NotFound, .. }));
        assert_eq!(verdicts[2], DoiVerdict::Confirmed);
    }

    #[test]
    fn cancelled_checks_are_unconfirmed() {
        let resolver = Arc::new(FixedResolver::new(&[]));
        let checker = DoiChecker::new(resolver.clone(), 2).unwrap();
        let entries = vec![ReferenceEntry::from_text("a", "doi:10.1000/1")];
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(checker.check_all(&entries, &cancel), vec![DoiVerdict::Unconfirmed]);
        assert!(resolver.lookups().is_empty());
    }

    struct CancelOnLookup {
        inner: FixedResolver,
        cancel: CancellationToken,
    }

    impl DoiResolver for CancelOnLookup {
        fn resolve(&self, doi: &str) -> Result<bool, ResolverError> {
            self.cancel.cancel();
            self.inner.resolve(doi)
        }
    }

    #[test]
    fn in_flight_lookup_finishes_after_cancel() {
        let cancel = CancellationToken::new();
        let resolver = Arc::new(CancelOnLookup {
            inner: FixedResolver::new(&["10.1000/1"]),
            cancel: cancel.clone(),
        });
        let checker = DoiChecker::new(resolver.clone(), 1).unwrap();
        let entries = vec![
            ReferenceEntry::from_text("a", "doi:10.1000/1"),
            ReferenceEntry::from_text("b", "doi:10.1000/2"),
            ReferenceEntry::from_text("c", "doi:10.1000/3"),
        ];

        let verdicts = checker.check_all(&entries, &cancel);
        assert_eq!(
            verdicts,
            vec![DoiVerdict::Confirmed, DoiVerdict::Unconfirmed, DoiVerdict::Unconfirmed]
        );
        assert_eq!(resolver.inner.lookups(), vec!["10.1000/1"]);
    }
}

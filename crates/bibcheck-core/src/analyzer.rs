//! Core analyzer for orchestrating reference checks.

use crate::config::{Config, RuleConfig};
use crate::context::FileContext;
use crate::doi::{DoiCheckError, DoiChecker, DoiVerdict, HttpDoiResolver};
use crate::entry::{EntrySummary, ReferenceEntry};
use crate::finder::scan;
use crate::rule::{Rule, RuleBox};
use crate::types::{DocumentReport, Issue, LintResult};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the unreadable document.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The DOI checker could not be created.
    #[error(transparent)]
    DoiCheck(#[from] DoiCheckError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    doi_checker: Option<DoiChecker>,
    http_doi: bool,
    cancellation: Option<CancellationToken>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file or directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a style rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed style rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Checks DOI existence with the given checker.
    #[must_use]
    pub fn doi_checker(mut self, checker: DoiChecker) -> Self {
        self.doi_checker = Some(checker);
        self
    }

    /// Checks DOI existence over HTTP, using the `[doi]` configuration.
    ///
    /// Ignored when `[doi] enabled = false` or when a checker was supplied
    /// with [`AnalyzerBuilder::doi_checker`].
    #[must_use]
    pub fn http_doi(mut self, enabled: bool) -> Self {
        self.http_doi = enabled;
        self
    }

    /// Sets the token used to abandon outstanding DOI lookups.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined or the
    /// DOI checker cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let doi_checker = match self.doi_checker {
            Some(checker) => Some(checker),
            None if self.http_doi && config.doi.enabled => {
                let resolver =
                    HttpDoiResolver::with_base_url(config.doi.resolver_url.clone(), config.doi.timeout());
                Some(DoiChecker::new(Arc::new(resolver), config.doi.workers)?)
            }
            None => None,
        };

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            config,
            doi_checker,
            cancellation: self.cancellation.unwrap_or_default(),
        })
    }
}

/// The main analyzer that orchestrates reference checks.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Config,
    doi_checker: Option<DoiChecker>,
    cancellation: CancellationToken,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the file or directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered style rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if DOI existence is checked.
    #[must_use]
    pub fn checks_doi(&self) -> bool {
        self.doi_checker.is_some()
    }

    /// Token that abandons outstanding DOI lookups when cancelled.
    ///
    /// This is a hook for embedding callers such as a service with request
    /// deadlines; the `bibcheck` binary never cancels it. Lookups already in
    /// flight still run to completion or to the resolver timeout.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }

    /// Discovers and checks every document under the root.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails or a document cannot be read.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for path in &files {
            let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Read {
                path: path.clone(),
                source: e,
            })?;
            result.push(self.analyze_source(path, &content));
        }

        info!(
            "Analysis complete: {} issues in {} files",
            result.issues().count(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks one document held in memory.
    ///
    /// `path` only names the document in the report; nothing is read from it.
    #[must_use]
    pub fn analyze_source(&self, path: &Path, content: &str) -> DocumentReport {
        let ctx = FileContext::new(path, content, &self.root);
        debug!("Analyzing: {}", ctx.relative_path.display());

        let scanned = scan(content);
        debug!(
            entries = scanned.entries.len(),
            comments = scanned.comments.len(),
            "scanned {}",
            ctx.relative_path.display()
        );

        let verdicts = self.check_dois(&scanned.entries);
        let mut issues = Vec::new();
        for (entry, verdict) in scanned.entries.iter().zip(verdicts) {
            issues.extend(self.check_entry(entry));
            issues.extend(self.doi_issue(entry, verdict));
        }

        DocumentReport {
            file: ctx.relative_path.clone(),
            entries_checked: scanned.entries.len(),
            entries: scanned.entries.iter().map(EntrySummary::from).collect(),
            issues,
            lines: ctx.line_index(),
        }
    }

    /// Runs every enabled style rule against one entry, in registry order.
    fn check_entry(&self, entry: &ReferenceEntry) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            if let Some(issue) = rule.check(entry) {
                issues.push(self.apply_severity_override(rule.name(), issue));
            }
        }
        issues
    }

    fn check_dois(&self, entries: &[ReferenceEntry]) -> Vec<DoiVerdict> {
        match &self.doi_checker {
            Some(checker) => checker.check_all(entries, &self.cancellation),
            None => vec![DoiVerdict::Confirmed; entries.len()],
        }
    }

    fn doi_issue(&self, entry: &ReferenceEntry, verdict: DoiVerdict) -> Option<Issue> {
        let DoiVerdict::Invalid { reason, .. } = &verdict else {
            return None;
        };
        let name = reason.kind().name();
        if !self.config.is_rule_enabled(name) {
            debug!("Skipping disabled rule: {}", name);
            return None;
        }
        let severity = self
            .config
            .rule_severity(name)
            .unwrap_or_else(|| reason.default_severity());
        verdict.into_issue(entry, severity)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, rule_name: &str, mut issue: Issue) -> Issue {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            issue.severity = severity;
        }
        issue
    }

    /// Discovers all LaTeX documents to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let pattern = format!("{}/**/*.tex", self.root.display());
        let mut files = Vec::new();

        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;

            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path);
        }

        Ok(files)
    }

    /// Checks if a path matches any exclude pattern, either as given or
    /// relative to the root.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        self.exclude_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches_path(path) || p.matches_path(relative))
                .unwrap_or(false)
        })
    }
}

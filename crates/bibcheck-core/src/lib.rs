//! # bibcheck-core
//!
//! Core framework for checking LaTeX bibliographies against the JACoW
//! reference style.
//!
//! This crate provides the foundational types for building reference
//! checks. It includes:
//!
//! - [`finder`] for locating comments, the document body and `\bibitem`
//!   entries in raw LaTeX
//! - [`Rule`] trait for per-entry style rules
//! - [`doi`] for confirming that DOIs resolve
//! - [`Analyzer`] for orchestrating checks over documents
//! - [`Issue`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use bibcheck_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./paper")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for document in &result.documents {
//!     println!("{}", document.render());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod entry;
mod rule;
mod span;
mod types;

pub mod doi;
pub mod finder;

/// Helpers shared by rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, DoiConfig, RuleConfig};
pub use context::{FileContext, LineIndex};
pub use entry::{EntrySummary, NormalizedText, ReferenceEntry};
pub use finder::{scan, ScannedDocument};
pub use rule::{Rule, RuleBox};
pub use span::{contained_in_any, Span};
pub use types::{
    DocumentReport, Issue, IssueDiagnostic, IssueKind, LintResult, Replacement, Severity,
    Suggestion, SUMMARY_THRESHOLD,
};

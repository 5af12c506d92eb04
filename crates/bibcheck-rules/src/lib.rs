//! # bibcheck-rules
//!
//! Built-in citation style rules for bibcheck.
//!
//! Every rule inspects one bibliography entry on its own and reports its
//! first match; an entry can carry issues from several rules at once.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | BIB001 | `et-al-with-comma` | Forbids a comma before "et al." or inside its italics group |
//! | BIB002 | `et-al-not-wrapped` | Requires "et al." in italics |
//! | BIB003 | `doi-contains-space` | Forbids `doi: 10...` |
//! | BIB004 | `doi-not-wrapped` | Requires `doi:10.` inside `\url` |
//! | BIB005 | `no-doi-prefix` | Forbids `\url{10.` without `doi:` |
//! | BIB006 | `doi-is-url` | Forbids `https://doi.org/...` |
//! | BIB007 | `volume-issue` | Requires "vol. N, no. N" |
//! | BIB008 | `incorrect-style-reference` | Flags references exported in another style |
//!
//! DOI existence (BIB101 to BIB103) is checked by
//! [`bibcheck_core::doi::DoiChecker`], not by a rule.
//!
//! ## Usage
//!
//! ```ignore
//! use bibcheck_core::Analyzer;
//! use bibcheck_rules::{EtAlNotWrapped, DoiIsUrl};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./paper")
//!     .rule(EtAlNotWrapped::new())
//!     .rule(DoiIsUrl::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod doi_contains_space;
mod doi_is_url;
mod doi_not_wrapped;
mod et_al_not_wrapped;
mod et_al_with_comma;
mod incorrect_style_reference;
mod no_doi_prefix;
mod patterns;
mod presets;
mod volume_issue;

pub use doi_contains_space::DoiContainsSpace;
pub use doi_is_url::DoiIsUrl;
pub use doi_not_wrapped::DoiNotWrapped;
pub use et_al_not_wrapped::EtAlNotWrapped;
pub use et_al_with_comma::EtAlWithComma;
pub use incorrect_style_reference::IncorrectStyleReference;
pub use no_doi_prefix::NoDoiPrefix;
pub use presets::{all_rules, rule_by_name};
pub use volume_issue::VolumeIssue;

/// Re-export core types for convenience.
pub use bibcheck_core::{Issue, Rule, Severity};

//! DOI existence checking.
//!
//! [`resolver`] talks to the outside world; [`checker`] decides what a
//! resolver answer means for an entry and runs checks concurrently.

pub mod checker;
pub mod resolver;

pub use checker::{
    check_doi, check_doi_exists, DoiCheckError, DoiChecker, DoiVerdict, InvalidReason, TrimPolicy,
    DEFAULT_WORKERS,
};
pub use resolver::{DoiResolver, HttpDoiResolver, ResolverError, DEFAULT_RESOLVER_URL, DEFAULT_TIMEOUT};

//! DOI resolution against an external resolver.

use std::time::Duration;

/// Default DOI resolver endpoint; the DOI is appended verbatim.
pub const DEFAULT_RESOLVER_URL: &str = "https://doi.org/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while talking to a resolver.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The request could not be completed (DNS, TLS, timeout, ...).
    #[error("failed to check DOI {doi}: {source}")]
    Transport {
        /// DOI being resolved.
        doi: String,
        /// Underlying transport error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// The resolver could not answer for another reason.
    #[error("resolver unavailable for DOI {doi}: {message}")]
    Unavailable {
        /// DOI being resolved.
        doi: String,
        /// Why no answer was obtained.
        message: String,
    },
}

/// Answers whether a DOI resolves.
///
/// `Ok(false)` means the resolver answered and the DOI does not exist;
/// `Err` means no answer could be obtained.
pub trait DoiResolver: Send + Sync {
    /// Resolves `doi`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver could not be reached.
    fn resolve(&self, doi: &str) -> Result<bool, ResolverError>;
}

/// Resolves DOIs with a `HEAD` request to `doi.org`, without following
/// redirects. Any 2xx or 3xx status means the DOI exists.
#[derive(Clone)]
pub struct HttpDoiResolver {
    agent: ureq::Agent,
    base_url: String,
}

impl std::fmt::Debug for HttpDoiResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDoiResolver")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Default for HttpDoiResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl HttpDoiResolver {
    /// Creates a resolver for `doi.org` with the given per-request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_RESOLVER_URL, timeout)
    }

    /// Creates a resolver against a custom endpoint.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .max_redirects(0)
            .max_redirects_will_error(false)
            .http_status_as_error(false)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            base_url: base_url.into(),
        }
    }

    /// The URL queried for `doi`.
    #[must_use]
    pub fn lookup_url(&self, doi: &str) -> String {
        format!("{}{doi}", self.base_url)
    }
}

impl DoiResolver for HttpDoiResolver {
    fn resolve(&self, doi: &str) -> Result<bool, ResolverError> {
        let url = self.lookup_url(doi);
        tracing::debug!(%url, "resolving DOI");

        let response = self
            .agent
            .head(&url)
            .call()
            .map_err(|e| ResolverError::Transport {
                doi: doi.to_string(),
                source: Box::new(e),
            })?;

        let status = response.status().as_u16();
        Ok((200..400).contains(&status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_url_appends_doi() {
        let resolver = HttpDoiResolver::default();
        assert_eq!(
            resolver.lookup_url("10.1000/182"),
            "https://doi.org/10.1000/182"
        );
    }

    #[test]
    fn custom_base_url() {
        let resolver = HttpDoiResolver::with_base_url("http://localhost:9/", Duration::from_secs(1));
        assert_eq!(resolver.lookup_url("10.1/x"), "http://localhost:9/10.1/x");
    }
}

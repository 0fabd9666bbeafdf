//! Domain error types.

use thiserror::Error;

/// Errors raised by a [`crate::SiteStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An active mapping already owns the same full domain.
    #[error("Domain already mapped: {0}")]
    DuplicateMapping(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The backing store could not be reached or timed out.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a failed template resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No active mapping for the host and no default template.
    #[error("No domain mapping or default template is configured")]
    NotConfigured,

    /// The store failed; callers retry on the next request.
    #[error("Template store unavailable: {0}")]
    TransientFetch(String),
}

impl From<StoreError> for ResolutionError {
    fn from(err: StoreError) -> Self {
        ResolutionError::TransientFetch(err.to_string())
    }
}

//! Error types for catalog loading.

use thiserror::Error;

/// Errors raised by a [`ListingSource`](super::ListingSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached.
    #[error("Listing source unavailable: {0}")]
    Unavailable(String),

    /// The source answered but reported a failure.
    #[error("Listing source rejected the request: {0}")]
    Rejected(String),

    /// The response could not be decoded.
    #[error("Listing source response invalid: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

//! Catalog API error types.

use thiserror::Error;

/// Errors that can occur talking to the mock catalog API.
///
/// There is no retry or backoff anywhere in the engine; callers surface
/// these and let the user retry the action.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport or body-decoding failure.
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned 404 for the addressed resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("catalog API returned {status}")]
    Status { status: reqwest::StatusCode },

    /// The configured base URL cannot carry path segments.
    #[error("catalog base URL cannot be a base")]
    BadBaseUrl,
}

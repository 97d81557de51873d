//! Unified application error type.
//!
//! Subsystems keep their own `thiserror` enums; this type folds them
//! together for callers (the CLI shell, scripted drivers) that want one
//! `Result` to match on.

use thiserror::Error;

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error for the storefront engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API operation failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Login failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout flow misuse.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Persisted blob could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

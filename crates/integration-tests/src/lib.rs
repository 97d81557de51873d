//! Integration tests for the Luxe storefront engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p luxe-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Full cart-to-confirmation scenarios
//! - `persistence` - User-data blob rehydration across restarts
//!
//! Everything runs against a temporary data directory with zero simulated
//! delays; no network access is needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use luxe_core::{Price, ProductId};
use luxe_storefront::models::Product;
use luxe_storefront::{AppState, StorefrontConfig};

/// A storefront wired to a throwaway data directory.
///
/// Dropping the harness deletes the directory; reuse [`TestStorefront::reopen`]
/// to simulate an application restart over the same persisted state.
pub struct TestStorefront {
    pub state: AppState,
    dir: tempfile::TempDir,
}

impl TestStorefront {
    /// A fresh storefront with an empty data directory and zero delays.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(StorefrontConfig::without_delays(dir.path().to_path_buf()));
        Self { state, dir }
    }

    /// Rebuild the application state over the same data directory.
    #[must_use]
    pub fn reopen(self) -> Self {
        let state = AppState::new(StorefrontConfig::without_delays(self.dir.path().to_path_buf()));
        Self {
            state,
            dir: self.dir,
        }
    }

    /// Path of the persisted user-data blob.
    #[must_use]
    pub fn blob_path(&self) -> std::path::PathBuf {
        self.dir.path().join("user-data.json")
    }
}

impl Default for TestStorefront {
    fn default() -> Self {
        Self::new()
    }
}

/// A catalog-shaped product fixture.
#[must_use]
pub fn product(id: i32, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Price::from_cents(cents),
        description: format!("Description for product {id}"),
        image: format!("https://example.com/{id}.jpg"),
        category: "test".to_string(),
    }
}

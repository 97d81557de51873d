//! Application state shared with the presentation layer.
//!
//! Constructed explicitly at startup and handed by reference to whatever
//! front end drives the engine; dropped on exit. Replaces the upstream
//! pattern of module-level context providers holding store state.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::account::UserStore;
use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::storage::UserDataFile;

/// Application state: config, catalog client, and the two stores.
///
/// Cheaply cloneable via `Arc`; clones share the same stores. All
/// mutation originates from the single interactive loop, so the mutexes
/// are uncontended and never held across an await point.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: Mutex<CartStore>,
    account: Mutex<UserStore>,
}

impl AppState {
    /// Build the application state, rehydrating the account store from the
    /// configured data directory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(config.api_base_url.clone());
        let account = UserStore::open(UserDataFile::in_dir(&config.data_dir));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(CartStore::new()),
                account: Mutex::new(account),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Lock the cart store.
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner.cart.lock()
    }

    /// Lock the account store.
    pub fn account(&self) -> MutexGuard<'_, UserStore> {
        self.inner.account.lock()
    }
}

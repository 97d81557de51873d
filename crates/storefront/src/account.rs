//! Account store: mock authentication, wishlist, and order history.
//!
//! One state machine over a single authentication flag plus its associated
//! profile, a wishlist with set semantics, and an append-only, newest-first
//! order list. Every transition goes through the closed [`AccountAction`]
//! set and is mirrored to the persisted blob; logout purges the blob
//! instead.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use luxe_core::ProductId;

use crate::auth::{self, AuthError};
use crate::models::{Order, OrderDraft, Product, ProfileUpdate, UserProfile};
use crate::storage::UserDataFile;

/// The full account state, serialized verbatim as the persisted blob.
///
/// Blob keys are camelCase: `{ isAuthenticated, user, wishlist, orders }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
    /// Product snapshots, unique by product id.
    pub wishlist: Vec<Product>,
    /// Newest first.
    pub orders: Vec<Order>,
}

impl AccountState {
    /// Wishlist membership by product id.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.wishlist.iter().any(|p| p.id == product_id)
    }

    /// Apply one account action.
    ///
    /// Wishlist insert/delete are idempotent; a duplicate add or an absent
    /// remove leaves the state untouched.
    pub fn apply(&mut self, action: AccountAction) {
        match action {
            AccountAction::LogIn(profile) => {
                self.is_authenticated = true;
                self.user = Some(profile);
            }
            AccountAction::LogOut => {
                self.is_authenticated = false;
                self.user = None;
            }
            AccountAction::UpdateProfile(update) => {
                if let Some(user) = self.user.as_mut() {
                    update.apply_to(user);
                }
            }
            AccountAction::AddToWishlist(product) => {
                if !self.is_in_wishlist(product.id) {
                    self.wishlist.push(product);
                }
            }
            AccountAction::RemoveFromWishlist(product_id) => {
                self.wishlist.retain(|p| p.id != product_id);
            }
            AccountAction::AddOrder(order) => {
                self.orders.insert(0, order);
            }
        }
    }
}

/// The closed set of account mutations.
#[derive(Debug, Clone)]
pub enum AccountAction {
    LogIn(UserProfile),
    LogOut,
    UpdateProfile(ProfileUpdate),
    AddToWishlist(Product),
    RemoveFromWishlist(ProductId),
    AddOrder(Order),
}

/// The account store: state plus its persistence handle.
#[derive(Debug)]
pub struct UserStore {
    state: AccountState,
    storage: UserDataFile,
}

impl UserStore {
    /// Open the store, rehydrating state from the persisted blob.
    #[must_use]
    pub fn open(storage: UserDataFile) -> Self {
        let state = storage.load();
        Self { state, storage }
    }

    /// Log in against the demo credential record.
    ///
    /// On success the profile is stored and persisted; on failure the state
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for any non-demo pair.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        delay: std::time::Duration,
    ) -> Result<(), AuthError> {
        let profile = auth::login(email, password, delay).await?;
        self.login_with_profile(profile);
        Ok(())
    }

    /// Apply the logged-in transition for an already-verified profile.
    ///
    /// This is the state half of [`Self::login`]; callers that run the
    /// credential check themselves (to avoid holding the store during the
    /// simulated delay) hand the resulting profile here.
    pub fn login_with_profile(&mut self, profile: UserProfile) {
        info!(email = %profile.email, "login succeeded");
        self.dispatch(AccountAction::LogIn(profile));
    }

    /// Clear authentication and profile, purging the persisted blob.
    ///
    /// Wishlist and order history stay available for the rest of the
    /// session but are no longer persisted.
    pub fn logout(&mut self) {
        self.state.apply(AccountAction::LogOut);
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "failed to purge persisted user data");
        }
    }

    /// Merge a partial profile update; no-op while logged out.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        self.dispatch(AccountAction::UpdateProfile(update));
    }

    /// Add a product snapshot to the wishlist (duplicate add is a no-op).
    pub fn add_to_wishlist(&mut self, product: &Product) {
        self.dispatch(AccountAction::AddToWishlist(product.clone()));
    }

    /// Remove a product from the wishlist (absent id is a no-op).
    pub fn remove_from_wishlist(&mut self, product_id: ProductId) {
        self.dispatch(AccountAction::RemoveFromWishlist(product_id));
    }

    /// Wishlist membership by product id.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.state.is_in_wishlist(product_id)
    }

    /// Record a completed order at the front of the history.
    ///
    /// Assigns a timestamp-derived id and the current UTC date; always
    /// succeeds. Returns the finalized record.
    pub fn add_order(&mut self, draft: OrderDraft) -> Order {
        let now = Utc::now();
        let order = Order::from_draft(draft, now.timestamp_millis().to_string(), now);
        self.dispatch(AccountAction::AddOrder(order.clone()));
        order
    }

    /// Whether a profile is currently authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// The authenticated profile, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    /// Wishlist snapshots.
    #[must_use]
    pub fn wishlist(&self) -> &[Product] {
        &self.state.wishlist
    }

    /// Order history, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.state.orders
    }

    /// Apply an action and mirror the result to the blob.
    ///
    /// A failed write is logged and otherwise ignored; the in-memory state
    /// stays authoritative for the session.
    fn dispatch(&mut self, action: AccountAction) {
        self.state.apply(action);
        if let Err(e) = self.storage.save(&self.state) {
            warn!(error = %e, "failed to persist user data");
        }
    }
}

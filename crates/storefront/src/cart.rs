//! Session-scoped shopping cart.
//!
//! The cart holds an insertion-ordered sequence of line items, unique by
//! product id, with derived totals recomputed from the live sequence on
//! every read. Mutation goes through the closed [`CartAction`] set; the
//! convenience methods on [`CartStore`] wrap the dispatch.
//!
//! Cart state is deliberately not persisted across restarts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use luxe_core::{Price, ProductId};

use crate::models::Product;

/// One product entry in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URI carried for display.
    pub image: String,
    /// Always >= 1 while the item is present.
    pub quantity: u32,
}

impl LineItem {
    /// A fresh single-unit line for a product.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// price x quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The closed set of cart mutations.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add one unit of a product (new line or quantity bump).
    Add(Product),
    /// Set a line's quantity exactly; `quantity < 1` removes the line.
    SetQuantity {
        product_id: ProductId,
        quantity: u32,
    },
    /// Remove a line entirely.
    Remove(ProductId),
    /// Empty the cart.
    Clear,
}

/// The shopping cart store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Apply one cart action.
    ///
    /// Every transition is a pure function of the current sequence; actions
    /// referencing an absent product id are no-ops.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add(product) => {
                if let Some(item) = self.find_mut(product.id) {
                    item.quantity += 1;
                } else {
                    self.items.push(LineItem::new(&product));
                }
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                if quantity < 1 {
                    self.items.retain(|item| item.product_id != product_id);
                } else if let Some(item) = self.find_mut(product_id) {
                    item.quantity = quantity;
                }
            }
            CartAction::Remove(product_id) => {
                self.items.retain(|item| item.product_id != product_id);
            }
            CartAction::Clear => self.items.clear(),
        }
        debug!(items = self.items.len(), "cart updated");
    }

    /// Add one unit of a product.
    pub fn add(&mut self, product: &Product) {
        self.apply(CartAction::Add(product.clone()));
    }

    /// Set a line's quantity exactly; any value below 1 removes the line.
    /// No-op if the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        self.apply(CartAction::SetQuantity {
            product_id,
            quantity,
        });
    }

    /// Remove a line if present.
    pub fn remove(&mut self, product_id: ProductId) {
        self.apply(CartAction::Remove(product_id));
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.apply(CartAction::Clear);
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count across all lines, recomputed on every call.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of price x quantity across all lines, recomputed on every call.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Snapshot the current line items, e.g. for an order record.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    fn find_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }
}

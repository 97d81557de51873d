//! Three-step checkout workflow: shipping, payment, confirmation.
//!
//! A UI-facing step machine gating one terminal action. Payment submission
//! simulates a processing delay that cannot fail, masks the card number,
//! records an order when a profile is authenticated, clears the cart, and
//! produces a time-derived confirmation number. There is no rollback path
//! and no partial-failure handling.

use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument};

use luxe_core::Price;

use crate::account::UserStore;
use crate::cart::CartStore;
use crate::models::{OrderDraft, PaymentCard, ShippingDetails};

/// Sales tax rate applied at checkout (8%).
fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// The checkout steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Complete,
}

/// Errors that can occur while driving the checkout flow.
///
/// The simulated processing step itself cannot fail; only misuse of the
/// step machine and an empty cart are rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("checkout step submitted out of order")]
    WrongStep,
}

/// Totals shown in the order summary and recorded on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTotals {
    pub subtotal: Price,
    pub tax: Price,
    /// Always zero: shipping is free.
    pub shipping: Price,
    pub total: Price,
}

impl CheckoutTotals {
    /// Compute totals for the current cart contents.
    #[must_use]
    pub fn for_cart(cart: &CartStore) -> Self {
        let subtotal = cart.total_price();
        let tax = subtotal * tax_rate();
        let shipping = Price::ZERO;
        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

/// The outcome of a completed checkout.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Display confirmation, e.g. `LUX-837261`.
    pub confirmation_number: String,
    /// Id of the recorded order; `None` for guest checkout.
    pub order_id: Option<String>,
    pub total: Price,
}

/// The checkout step machine.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    shipping: Option<ShippingDetails>,
    complete: bool,
}

impl CheckoutFlow {
    /// Start a fresh checkout at the shipping step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shipping: None,
            complete: false,
        }
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        if self.complete {
            CheckoutStep::Complete
        } else if self.shipping.is_some() {
            CheckoutStep::Payment
        } else {
            CheckoutStep::Shipping
        }
    }

    /// Record shipping details and advance to the payment step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] unless the flow is at the
    /// shipping step.
    pub fn submit_shipping(&mut self, details: ShippingDetails) -> Result<(), CheckoutError> {
        if self.step() != CheckoutStep::Shipping {
            return Err(CheckoutError::WrongStep);
        }
        self.shipping = Some(details);
        Ok(())
    }

    /// Return from the payment step to edit shipping details.
    pub fn back_to_shipping(&mut self) {
        if !self.complete {
            self.shipping = None;
        }
    }

    /// Submit payment: the single terminal action of the flow.
    ///
    /// Sleeps the simulated processing delay, masks the card, records an
    /// order when authenticated, clears the cart, and completes the flow.
    ///
    /// Callers that must not hold store borrows across the delay (the
    /// interactive shell) can use [`Self::begin_payment`] and
    /// [`Self::complete_payment`] around their own sleep instead.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] unless the flow is at the
    /// payment step, or [`CheckoutError::EmptyCart`] if there is nothing to
    /// buy.
    #[instrument(skip_all)]
    pub async fn submit_payment(
        &mut self,
        card: PaymentCard,
        cart: &mut CartStore,
        account: &mut UserStore,
        delay: Duration,
    ) -> Result<Receipt, CheckoutError> {
        self.begin_payment(cart)?;

        // Simulated payment processing; cannot fail.
        tokio::time::sleep(delay).await;

        self.complete_payment(card, cart, account)
    }

    /// Validate that payment can be submitted right now.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::submit_payment`].
    pub fn begin_payment(&self, cart: &CartStore) -> Result<(), CheckoutError> {
        if self.step() != CheckoutStep::Payment {
            return Err(CheckoutError::WrongStep);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(())
    }

    /// The synchronous tail of payment submission.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::submit_payment`]; revalidates in case the
    /// cart changed between phases.
    pub fn complete_payment(
        &mut self,
        card: PaymentCard,
        cart: &mut CartStore,
        account: &mut UserStore,
    ) -> Result<Receipt, CheckoutError> {
        self.begin_payment(cart)?;
        let Some(shipping) = self.shipping.clone() else {
            return Err(CheckoutError::WrongStep);
        };

        let totals = CheckoutTotals::for_cart(cart);
        let draft = OrderDraft {
            items: cart.snapshot(),
            shipping,
            payment: card.into_summary(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping_cost: totals.shipping,
            total: totals.total,
        };

        let order_id = if account.is_authenticated() {
            Some(account.add_order(draft).id)
        } else {
            None
        };

        cart.clear();
        self.complete = true;

        let confirmation_number = confirmation_number(Utc::now().timestamp_millis());
        info!(confirmation = %confirmation_number, "checkout complete");

        Ok(Receipt {
            confirmation_number,
            order_id,
            total: totals.total,
        })
    }
}

/// Confirmation number from the last six digits of an epoch-millis stamp.
fn confirmation_number(timestamp_millis: i64) -> String {
    let digits = timestamp_millis.to_string();
    let tail: String = digits
        .chars()
        .rev()
        .take(6)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("LUX-{tail}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use luxe_core::ProductId;

    use crate::models::Product;
    use crate::storage::UserDataFile;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents),
            description: String::new(),
            image: String::new(),
            category: "test".to_string(),
        }
    }

    fn account() -> (tempfile::TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::open(UserDataFile::in_dir(dir.path()));
        (dir, store)
    }

    fn card() -> PaymentCard {
        PaymentCard {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry: "12/28".to_string(),
            name_on_card: "Alexandra Sterling".to_string(),
        }
    }

    #[test]
    fn test_totals_with_tax_and_free_shipping() {
        let mut cart = CartStore::new();
        let a = product(1, 1000);
        cart.add(&a);
        cart.add(&a);
        cart.add(&product(2, 500));

        let totals = CheckoutTotals::for_cart(&cart);
        assert_eq!(totals.subtotal, Price::from_cents(2500));
        assert_eq!(totals.tax, Price::from_cents(200));
        assert_eq!(totals.shipping, Price::ZERO);
        assert_eq!(totals.total, Price::from_cents(2700));
    }

    #[test]
    fn test_confirmation_number_format() {
        assert_eq!(confirmation_number(1_724_670_123_456), "LUX-123456");
        // Short stamps keep whatever digits exist
        assert_eq!(confirmation_number(42), "LUX-42");
    }

    #[test]
    fn test_steps_advance_and_back() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.step(), CheckoutStep::Shipping);

        flow.submit_shipping(ShippingDetails::default()).unwrap();
        assert_eq!(flow.step(), CheckoutStep::Payment);

        flow.back_to_shipping();
        assert_eq!(flow.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_shipping_resubmission_out_of_order() {
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(ShippingDetails::default()).unwrap();
        assert_eq!(
            flow.submit_shipping(ShippingDetails::default()),
            Err(CheckoutError::WrongStep)
        );
    }

    #[tokio::test]
    async fn test_payment_before_shipping_is_rejected() {
        let mut flow = CheckoutFlow::new();
        let mut cart = CartStore::new();
        cart.add(&product(1, 1000));
        let (_dir, mut store) = account();

        let err = flow
            .submit_payment(card(), &mut cart, &mut store, Duration::ZERO)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::WrongStep);
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(ShippingDetails::default()).unwrap();
        let mut cart = CartStore::new();
        let (_dir, mut store) = account();

        let err = flow
            .submit_payment(card(), &mut cart, &mut store, Duration::ZERO)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[tokio::test]
    async fn test_authenticated_checkout_records_order_and_clears_cart() {
        let mut cart = CartStore::new();
        let a = product(1, 1000);
        cart.add(&a);
        cart.add(&a);
        cart.add(&product(2, 500));

        let (_dir, mut store) = account();
        store
            .login("demo@luxury.com", "demo123", Duration::ZERO)
            .await
            .unwrap();

        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(ShippingDetails::from_profile(store.user().unwrap()))
            .unwrap();

        let receipt = flow
            .submit_payment(card(), &mut cart, &mut store, Duration::ZERO)
            .await
            .unwrap();

        assert!(receipt.confirmation_number.starts_with("LUX-"));
        assert_eq!(receipt.total, Price::from_cents(2700));
        assert!(cart.is_empty());
        assert_eq!(flow.step(), CheckoutStep::Complete);

        let order = store.orders().first().unwrap();
        assert_eq!(Some(order.id.clone()), receipt.order_id);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.payment.card_number, "**** **** **** 4242");
        assert_eq!(order.total, Price::from_cents(2700));
    }

    #[tokio::test]
    async fn test_guest_checkout_records_no_order() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 1000));
        let (_dir, mut store) = account();

        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(ShippingDetails::default()).unwrap();

        let receipt = flow
            .submit_payment(card(), &mut cart, &mut store, Duration::ZERO)
            .await
            .unwrap();

        assert!(receipt.order_id.is_none());
        assert!(store.orders().is_empty());
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_double_submission_is_rejected() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 1000));
        let (_dir, mut store) = account();

        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(ShippingDetails::default()).unwrap();
        flow.submit_payment(card(), &mut cart, &mut store, Duration::ZERO)
            .await
            .unwrap();

        cart.add(&product(2, 500));
        let err = flow
            .submit_payment(card(), &mut cart, &mut store, Duration::ZERO)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::WrongStep);
    }
}

//! Order domain types.
//!
//! Orders are append-only records created at checkout completion and never
//! mutated afterwards. Card numbers are masked to their last four digits
//! before an order is built; the full number never reaches the order list
//! or the persisted blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use luxe_core::{OrderStatus, Price};

use crate::cart::LineItem;
use crate::models::user::UserProfile;

/// Shipping information collected in checkout step one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl ShippingDetails {
    /// Prefill the shipping form from a logged-in profile.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        let mut names = profile.name.splitn(2, ' ');
        Self {
            first_name: names.next().unwrap_or_default().to_string(),
            last_name: names.next().unwrap_or_default().to_string(),
            email: profile.email.as_str().to_string(),
            phone: profile.phone.clone(),
            address: profile.address.street.clone(),
            city: profile.address.city.clone(),
            state: profile.address.state.clone(),
            zip: profile.address.zip.clone(),
            country: if profile.address.country.is_empty() {
                "United States".to_string()
            } else {
                profile.address.country.clone()
            },
        }
    }
}

/// Payment information collected in checkout step two.
///
/// Held only for the duration of payment submission; converted to a
/// [`PaymentSummary`] with a masked number before anything is recorded.
#[derive(Debug, Clone)]
pub struct PaymentCard {
    pub card_number: String,
    /// MM/YY.
    pub expiry: String,
    pub name_on_card: String,
}

impl PaymentCard {
    /// Mask the card down to a recordable summary.
    #[must_use]
    pub fn into_summary(self) -> PaymentSummary {
        PaymentSummary {
            card_number: mask_card_number(&self.card_number),
            expiry: self.expiry,
            name_on_card: self.name_on_card,
        }
    }
}

/// The masked payment record stored on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Masked to `**** **** **** <last4>`.
    pub card_number: String,
    pub expiry: String,
    pub name_on_card: String,
}

/// Mask a card number to its last four digits.
fn mask_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(char::is_ascii_digit).collect();
    let last4: String = digits.iter().rev().take(4).rev().collect();
    format!("**** **** **** {last4}")
}

/// Everything checkout knows about an order before the account store
/// assigns it an id, date, and status.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<LineItem>,
    pub shipping: ShippingDetails,
    pub payment: PaymentSummary,
    pub subtotal: Price,
    pub tax: Price,
    pub shipping_cost: Price,
    pub total: Price,
}

/// A completed order in the account's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Timestamp-derived string id.
    pub id: String,
    pub items: Vec<LineItem>,
    pub shipping: ShippingDetails,
    pub payment: PaymentSummary,
    pub subtotal: Price,
    pub tax: Price,
    pub shipping_cost: Price,
    pub total: Price,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Finalize a draft with its generated id and current timestamp.
    #[must_use]
    pub fn from_draft(draft: OrderDraft, id: String, date: DateTime<Utc>) -> Self {
        Self {
            id,
            items: draft.items,
            shipping: draft.shipping,
            payment: draft.payment,
            subtotal: draft.subtotal,
            tax: draft.tax,
            shipping_cost: draft.shipping_cost,
            total: draft.total,
            date,
            status: OrderStatus::Confirmed,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use luxe_core::{Email, UserId};

    use crate::models::user::{Address, Preferences};

    #[test]
    fn test_mask_card_number() {
        assert_eq!(
            mask_card_number("4242 4242 4242 4242"),
            "**** **** **** 4242"
        );
        assert_eq!(mask_card_number("1234567890123456"), "**** **** **** 3456");
    }

    #[test]
    fn test_mask_short_number() {
        // Garbage in, masked garbage out; checkout does no card validation
        assert_eq!(mask_card_number("99"), "**** **** **** 99");
    }

    #[test]
    fn test_into_summary_masks() {
        let summary = PaymentCard {
            card_number: "4242424242424242".to_string(),
            expiry: "12/28".to_string(),
            name_on_card: "A Sterling".to_string(),
        }
        .into_summary();

        assert_eq!(summary.card_number, "**** **** **** 4242");
        assert!(!summary.card_number.contains("4242424242424242"));
    }

    #[test]
    fn test_shipping_prefill_splits_name() {
        let profile = UserProfile {
            id: UserId::new(1),
            email: Email::parse("demo@luxury.com").unwrap(),
            name: "Alexandra Sterling".to_string(),
            avatar: String::new(),
            phone: "+1 (555) 123-4567".to_string(),
            address: Address {
                street: "123 Madison Avenue".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                zip: "10016".to_string(),
                country: "United States".to_string(),
            },
            preferences: Preferences::default(),
        };

        let shipping = ShippingDetails::from_profile(&profile);
        assert_eq!(shipping.first_name, "Alexandra");
        assert_eq!(shipping.last_name, "Sterling");
        assert_eq!(shipping.address, "123 Madison Avenue");
        assert_eq!(shipping.country, "United States");
    }
}

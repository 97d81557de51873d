//! Status enums for various entities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Checkout only ever produces [`OrderStatus::Confirmed`]; the remaining
/// variants exist for display of historical data and forward compatibility
/// with a real fulfillment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

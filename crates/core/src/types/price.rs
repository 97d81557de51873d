//! Type-safe price representation using decimal arithmetic.
//!
//! All prices in the engine are USD. The mock catalog API sends prices as
//! bare JSON numbers, so [`Price`] serializes transparently as a decimal
//! number rather than an amount/currency pair.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A USD price.
///
/// Wraps [`Decimal`] to keep money arithmetic exact; never constructed from
/// binary floats inside the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The price of `quantity` units at this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    /// Format for display, e.g. `$19.99`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    /// Scale by a decimal rate, e.g. a tax rate.
    fn mul(self, rate: Decimal) -> Self {
        Self(self.0 * rate)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
        assert_eq!(Price::from_cents(500).to_string(), "$5.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_times_quantity() {
        let price = Price::from_cents(1000);
        assert_eq!(price.times(2), Price::from_cents(2000));
        assert_eq!(price.times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(2000), Price::from_cents(500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(2500));
    }

    #[test]
    fn test_scale_by_rate() {
        // 8% tax on $25.00
        let tax = Price::from_cents(2500) * Decimal::new(8, 2);
        assert_eq!(tax, Price::from_cents(200));
    }

    #[test]
    fn test_serde_bare_number() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(price, Price::from_cents(10995));

        let json = serde_json::to_string(&Price::from_cents(550)).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Price::from_cents(550));
    }
}

//! Fixed-point money amounts.
//!
//! Player costs, budgets and selling prices are quoted in millions with a
//! granularity of 0.1. [`Price`] stores them as an integer count of 0.1 units so
//! that budget arithmetic and the profit-sharing rule are exact.
//!
//! On the wire a price is a plain decimal number of millions (`5.5`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of price units per million.
pub const UNITS_PER_MILLION: i32 = 10;

/// A monetary amount in units of 0.1 million.
///
/// Prices may be negative when they represent a balance (for example the net
/// spend of a transfer window that sold more than it bought).
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Sum,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(i32);

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PriceError {
    #[display("price {value} is not a finite number")]
    NonFinite { value: f64 },
    #[display("price {value} is not a multiple of 0.1")]
    OffGrid { value: f64 },
    #[display("price {value} is out of range")]
    OutOfRange { value: f64 },
}

impl Price {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_tenths(tenths: i32) -> Self {
        Self(tenths)
    }

    /// Converts an amount in millions, rejecting values off the 0.1 grid.
    ///
    /// ```
    /// use gaffer_core::Price;
    ///
    /// assert_eq!(Price::from_millions(5.5).unwrap(), Price::from_tenths(55));
    /// assert!(Price::from_millions(5.55).is_err());
    /// ```
    pub fn from_millions(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NonFinite { value });
        }
        let scaled = value * f64::from(UNITS_PER_MILLION);
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(PriceError::OffGrid { value });
        }
        if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
            return Err(PriceError::OutOfRange { value });
        }
        #[expect(clippy::cast_possible_truncation)]
        let tenths = rounded as i32;
        Ok(Self(tenths))
    }

    #[must_use]
    pub const fn tenths(self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn as_millions(self) -> f64 {
        f64::from(self.0) / f64::from(UNITS_PER_MILLION)
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_millions(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.as_millions()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let units = self.0.unsigned_abs();
        let per_million = UNITS_PER_MILLION.unsigned_abs();
        write!(
            f,
            "{sign}{}.{}",
            units / per_million,
            units % per_million
        )
    }
}

/// Computes the amount credited when a held player is sold.
///
/// When the player's cost has risen since purchase, only half of the profit is
/// credited, rounded down to the nearest 0.1. A loss or unchanged price is
/// passed on in full, so the selling price equals the current cost.
///
/// ```
/// use gaffer_core::{Price, selling_price};
///
/// let sell = selling_price(Price::from_tenths(50), Price::from_tenths(60));
/// assert_eq!(sell, Price::from_tenths(55));
///
/// let sell = selling_price(Price::from_tenths(55), Price::from_tenths(52));
/// assert_eq!(sell, Price::from_tenths(52));
/// ```
#[must_use]
pub fn selling_price(purchase_price: Price, current_cost: Price) -> Price {
    if current_cost > purchase_price {
        let profit = current_cost.0 - purchase_price.0;
        Price(purchase_price.0 + profit / 2)
    } else {
        current_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millions_accepts_grid_values() {
        assert_eq!(Price::from_millions(100.0).unwrap(), Price::from_tenths(1000));
        assert_eq!(Price::from_millions(4.5).unwrap(), Price::from_tenths(45));
        assert_eq!(Price::from_millions(0.1 + 0.2).unwrap(), Price::from_tenths(3));
        assert_eq!(Price::from_millions(-1.5).unwrap(), Price::from_tenths(-15));
    }

    #[test]
    fn test_from_millions_rejects_bad_values() {
        assert!(matches!(
            Price::from_millions(f64::NAN),
            Err(PriceError::NonFinite { .. })
        ));
        assert!(matches!(
            Price::from_millions(5.25),
            Err(PriceError::OffGrid { .. })
        ));
        assert!(matches!(
            Price::from_millions(1e12),
            Err(PriceError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_tenths(55).to_string(), "5.5");
        assert_eq!(Price::from_tenths(1000).to_string(), "100.0");
        assert_eq!(Price::from_tenths(-3).to_string(), "-0.3");
        assert_eq!(Price::ZERO.to_string(), "0.0");
    }

    #[test]
    fn test_serde_as_millions() {
        let price: Price = serde_json::from_str("5.5").unwrap();
        assert_eq!(price, Price::from_tenths(55));
        let price: Price = serde_json::from_str("7").unwrap();
        assert_eq!(price, Price::from_tenths(70));
        assert_eq!(serde_json::to_string(&Price::from_tenths(55)).unwrap(), "5.5");
        assert!(serde_json::from_str::<Price>("5.55").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let total: Price = [45, 55, 100].into_iter().map(Price::from_tenths).sum();
        assert_eq!(total, Price::from_tenths(200));
        assert_eq!(
            Price::from_tenths(10) - Price::from_tenths(25),
            Price::from_tenths(-15)
        );
    }

    #[test]
    fn test_selling_price_shares_half_the_profit() {
        // profit 1.0, half credited
        assert_eq!(
            selling_price(Price::from_tenths(50), Price::from_tenths(60)),
            Price::from_tenths(55)
        );
        // profit 0.3, half is 0.15, rounded down to 0.1
        assert_eq!(
            selling_price(Price::from_tenths(50), Price::from_tenths(53)),
            Price::from_tenths(51)
        );
        // profit 0.1 is not enough to credit anything
        assert_eq!(
            selling_price(Price::from_tenths(50), Price::from_tenths(51)),
            Price::from_tenths(50)
        );
    }

    #[test]
    fn test_selling_price_passes_losses_on() {
        assert_eq!(
            selling_price(Price::from_tenths(55), Price::from_tenths(52)),
            Price::from_tenths(52)
        );
        assert_eq!(
            selling_price(Price::from_tenths(55), Price::from_tenths(55)),
            Price::from_tenths(55)
        );
    }
}

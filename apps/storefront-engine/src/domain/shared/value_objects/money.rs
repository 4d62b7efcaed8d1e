//! Money value object for currency amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

use crate::domain::shared::DomainError;

/// A monetary amount in USD.
///
/// Represented as a Decimal for precise financial calculations.
/// Always uses 2 decimal places for display (but internal precision is higher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from cents (integer).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a Money value from whole dollars.
    #[must_use]
    pub fn from_major(dollars: i64) -> Self {
        Self(Decimal::new(dollars, 0))
    }

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Round to 2 decimal places (cents).
    #[must_use]
    pub fn round(&self) -> Self {
        Self(self.0.round_dp(2))
    }

    /// Take a fraction of this amount, rounded to cents.
    ///
    /// Used for the deposit minimum and the cancellation-fee arithmetic.
    #[must_use]
    pub fn fraction(&self, rate: Decimal) -> Self {
        Self((self.0 * rate).round_dp(2))
    }

    /// Check that this amount is usable as a retail unit price.
    ///
    /// # Errors
    ///
    /// Returns error if the amount is not positive or carries sub-cent
    /// precision.
    pub fn validate_price(&self) -> Result<(), DomainError> {
        if !self.is_positive() {
            return Err(DomainError::InvalidValue {
                field: "price".to_string(),
                message: "Price must be positive".to_string(),
            });
        }
        if self.0.round_dp(2) != self.0 {
            return Err(DomainError::InvalidValue {
                field: "price".to_string(),
                message: "Price cannot carry sub-cent precision".to_string(),
            });
        }
        Ok(())
    }

    /// Check that this amount is usable as a payment amount.
    ///
    /// # Errors
    ///
    /// Returns error if the amount is not positive or exceeds the per-payment
    /// ceiling.
    pub fn validate_payment(&self) -> Result<(), DomainError> {
        if !self.is_positive() {
            return Err(DomainError::InvalidValue {
                field: "amount".to_string(),
                message: "Payment amount must be positive".to_string(),
            });
        }
        let max = Decimal::new(1_000_000, 0); // $1M ceiling per movement
        if self.0 > max {
            return Err(DomainError::InvalidValue {
                field: "amount".to_string(),
                message: format!("Payment amount exceeds maximum: ${max}"),
            });
        }
        Ok(())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

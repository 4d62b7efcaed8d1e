//! Quantity value object for unit counts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::domain::shared::DomainError;

/// A count of retail units.
///
/// Backed by `u32`: stock and line quantities are always whole units and
/// never negative by construction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Create a new Quantity.
    #[must_use]
    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    /// Zero quantity.
    pub const ZERO: Self = Self(0);

    /// Get the inner unit count.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns true if this quantity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add without overflow.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtract, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(&self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Subtract, failing on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The smaller of two quantities.
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }

    /// Validate quantity for a cart or order line.
    ///
    /// # Errors
    ///
    /// Returns error if the quantity is zero or exceeds the per-line ceiling.
    pub fn validate_for_line(&self) -> Result<(), DomainError> {
        if self.0 == 0 {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: "Line quantity must be at least 1".to_string(),
            });
        }
        const MAX_PER_LINE: u32 = 10_000;
        if self.0 > MAX_PER_LINE {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: format!("Line quantity exceeds maximum: {MAX_PER_LINE}"),
            });
        }
        Ok(())
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_basics() {
        let q = Quantity::new(3);
        assert_eq!(q.value(), 3);
        assert!(!q.is_zero());
        assert!(Quantity::ZERO.is_zero());
    }

    #[test]
    fn quantity_saturating_sub_clamps() {
        let small = Quantity::new(2);
        let big = Quantity::new(5);
        assert_eq!(small.saturating_sub(big), Quantity::ZERO);
        assert_eq!(big.saturating_sub(small), Quantity::new(3));
    }

    #[test]
    fn quantity_checked_sub() {
        assert_eq!(
            Quantity::new(5).checked_sub(Quantity::new(3)),
            Some(Quantity::new(2))
        );
        assert_eq!(Quantity::new(2).checked_sub(Quantity::new(3)), None);
    }

    #[test]
    fn quantity_min() {
        assert_eq!(Quantity::new(7).min(Quantity::new(3)), Quantity::new(3));
        assert_eq!(Quantity::new(1).min(Quantity::new(3)), Quantity::new(1));
    }

    #[test]
    fn quantity_validate_for_line() {
        assert!(Quantity::ZERO.validate_for_line().is_err());
        assert!(Quantity::new(1).validate_for_line().is_ok());
        assert!(Quantity::new(10_001).validate_for_line().is_err());
    }

    #[test]
    fn quantity_ordering_and_add() {
        assert!(Quantity::new(2) < Quantity::new(3));
        assert_eq!(Quantity::new(2) + Quantity::new(3), Quantity::new(5));
    }

    #[test]
    fn quantity_serde_roundtrip() {
        let q = Quantity::new(42);
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, "42");
        let parsed: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, q);
    }
}

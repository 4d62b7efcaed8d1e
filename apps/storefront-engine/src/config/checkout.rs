//! Checkout policy configuration.
//!
//! Business-policy knobs for order placement and cancellation: tax,
//! shipping, the deposit minimum, and the cancellation window/fee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Checkout policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Tax applied to the item subtotal (fraction, e.g. 0.10).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
    /// Flat shipping charge in dollars.
    #[serde(default = "default_shipping_flat")]
    pub shipping_flat: Decimal,
    /// Item subtotal at which shipping becomes free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: Decimal,
    /// Minimum deposit as a fraction of the order total.
    #[serde(default = "default_deposit_fraction")]
    pub deposit_fraction: Decimal,
    /// Hours after placement during which cancellation is allowed.
    #[serde(default = "default_cancellation_window_hours")]
    pub cancellation_window_hours: i64,
    /// Non-refundable fraction withheld from cancellation refunds.
    #[serde(default = "default_cancellation_fee_rate")]
    pub cancellation_fee_rate: Decimal,
}

impl CheckoutConfig {
    /// Shipping charge for a given item subtotal.
    #[must_use]
    pub fn shipping_for(&self, items: Money) -> Money {
        if items.amount() >= self.free_shipping_threshold {
            Money::ZERO
        } else {
            Money::new(self.shipping_flat)
        }
    }

    /// The cancellation window as a duration.
    #[must_use]
    pub fn cancellation_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.cancellation_window_hours)
    }

    /// Fraction of a paid amount returned on cancellation.
    #[must_use]
    pub fn refund_fraction(&self) -> Decimal {
        Decimal::ONE - self.cancellation_fee_rate
    }

    /// Validate the policy values.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        let unit_fractions = [
            ("tax_rate", self.tax_rate),
            ("deposit_fraction", self.deposit_fraction),
            ("cancellation_fee_rate", self.cancellation_fee_rate),
        ];
        for (name, value) in unit_fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(format!("{name} must be within [0, 1], got {value}"));
            }
        }
        if self.shipping_flat < Decimal::ZERO {
            return Err(format!(
                "shipping_flat cannot be negative, got {}",
                self.shipping_flat
            ));
        }
        if self.cancellation_window_hours <= 0 {
            return Err(format!(
                "cancellation_window_hours must be positive, got {}",
                self.cancellation_window_hours
            ));
        }
        Ok(())
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            shipping_flat: default_shipping_flat(),
            free_shipping_threshold: default_free_shipping_threshold(),
            deposit_fraction: default_deposit_fraction(),
            cancellation_window_hours: default_cancellation_window_hours(),
            cancellation_fee_rate: default_cancellation_fee_rate(),
        }
    }
}

fn default_tax_rate() -> Decimal {
    Decimal::new(10, 2) // 0.10
}

fn default_shipping_flat() -> Decimal {
    Decimal::new(1000, 2) // $10.00
}

fn default_free_shipping_threshold() -> Decimal {
    Decimal::new(10000, 2) // $100.00
}

fn default_deposit_fraction() -> Decimal {
    Decimal::new(50, 2) // 0.50
}

const fn default_cancellation_window_hours() -> i64 {
    24
}

fn default_cancellation_fee_rate() -> Decimal {
    Decimal::new(2, 2) // 0.02
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_validate() {
        let config = CheckoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.deposit_fraction, dec!(0.50));
        assert_eq!(config.cancellation_window_hours, 24);
        assert_eq!(config.cancellation_fee_rate, dec!(0.02));
    }

    #[test]
    fn shipping_free_over_threshold() {
        let config = CheckoutConfig::default();
        assert_eq!(
            config.shipping_for(Money::from_cents(9999)),
            Money::from_cents(1000)
        );
        assert_eq!(config.shipping_for(Money::from_cents(10000)), Money::ZERO);
    }

    #[test]
    fn refund_fraction_complements_fee() {
        let config = CheckoutConfig::default();
        assert_eq!(config.refund_fraction(), dec!(0.98));
    }

    #[test]
    fn validate_rejects_out_of_range_fraction() {
        let config = CheckoutConfig {
            deposit_fraction: dec!(1.5),
            ..CheckoutConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_window() {
        let config = CheckoutConfig {
            cancellation_window_hours: 0,
            ..CheckoutConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

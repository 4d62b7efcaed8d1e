//! Payment processor configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the (simulated) payment processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    /// Probability that the mock processor approves a charge.
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
    /// Simulated processor latency in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Deadline for a single charge attempt in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl PaymentsConfig {
    /// Simulated latency as a duration.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Charge deadline as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(format!(
                "success_rate must be within [0, 1], got {}",
                self.success_rate
            ));
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            success_rate: default_success_rate(),
            latency_ms: default_latency_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

const fn default_success_rate() -> f64 {
    0.80
}

const fn default_latency_ms() -> u64 {
    150
}

const fn default_timeout_ms() -> u64 {
    5_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = PaymentsConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.success_rate - 0.80).abs() < f64::EPSILON);
        assert_eq!(config.timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn validate_rejects_bad_rate() {
        let config = PaymentsConfig {
            success_rate: 1.2,
            ..PaymentsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = PaymentsConfig {
            timeout_ms: 0,
            ..PaymentsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

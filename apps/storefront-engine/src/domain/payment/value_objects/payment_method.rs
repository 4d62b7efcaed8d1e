//! Payment methods accepted by the storefront.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// Stored wallet balance.
    Wallet,
    /// Direct bank transfer.
    BankTransfer,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Wallet => write!(f, "wallet"),
            Self::BankTransfer => write!(f, "bank_transfer"),
        }
    }
}

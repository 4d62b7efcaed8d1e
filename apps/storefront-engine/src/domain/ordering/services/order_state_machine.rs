//! Order State Machine Service
//!
//! Validates fulfilment-status transitions. Admins may move freely between
//! the non-terminal statuses; terminal statuses accept no transition except
//! `Delivered -> Returned`.

use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::value_objects::OrderStatus;

/// Order state machine for validating transitions.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Check if a state transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        if from == to {
            return false;
        }
        match (from, to) {
            // Free movement between the non-terminal statuses.
            (f, t) if f.is_active() && t.is_active() => true,
            // Any non-terminal order can be delivered or cancelled.
            (f, OrderStatus::Delivered | OrderStatus::Cancelled) if f.is_active() => true,
            // Goods can come back once they have left the warehouse.
            (OrderStatus::Shipped | OrderStatus::Delivered, OrderStatus::Returned) => true,
            _ => false,
        }
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns error if the transition is invalid.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(OrderError::InvalidStateTransition {
                from,
                to,
                reason: Self::transition_error_reason(from, to),
            })
        }
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(from: OrderStatus, to: OrderStatus) -> String {
        match from {
            OrderStatus::Cancelled => format!("Order is cancelled, cannot transition to {to}"),
            OrderStatus::Returned => format!("Order was returned, cannot transition to {to}"),
            OrderStatus::Delivered => format!("Order is delivered, cannot transition to {to}"),
            _ if from == to => format!("Order is already {to}"),
            _ => format!("Invalid transition from {from} to {to}"),
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> Vec<OrderStatus> {
        use OrderStatus::{Cancelled, Delivered, Pending, Processing, Returned, Shipped};
        [Pending, Processing, Shipped, Delivered, Cancelled, Returned]
            .into_iter()
            .filter(|to| Self::is_valid_transition(from, *to))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(OrderStatus::Pending, OrderStatus::Processing, true)]
    #[test_case(OrderStatus::Pending, OrderStatus::Shipped, true)]
    #[test_case(OrderStatus::Processing, OrderStatus::Pending, true; "admin can walk a status back")]
    #[test_case(OrderStatus::Shipped, OrderStatus::Delivered, true)]
    #[test_case(OrderStatus::Pending, OrderStatus::Cancelled, true)]
    #[test_case(OrderStatus::Shipped, OrderStatus::Returned, true)]
    #[test_case(OrderStatus::Delivered, OrderStatus::Returned, true)]
    #[test_case(OrderStatus::Pending, OrderStatus::Returned, false; "nothing shipped yet")]
    #[test_case(OrderStatus::Delivered, OrderStatus::Shipped, false)]
    #[test_case(OrderStatus::Cancelled, OrderStatus::Processing, false)]
    #[test_case(OrderStatus::Returned, OrderStatus::Pending, false)]
    #[test_case(OrderStatus::Processing, OrderStatus::Processing, false; "self loop")]
    fn transition_matrix(from: OrderStatus, to: OrderStatus, expected: bool) {
        assert_eq!(OrderStateMachine::is_valid_transition(from, to), expected);
    }

    #[test]
    fn cancelled_and_returned_accept_nothing() {
        assert!(OrderStateMachine::valid_next_states(OrderStatus::Cancelled).is_empty());
        assert!(OrderStateMachine::valid_next_states(OrderStatus::Returned).is_empty());
    }

    #[test]
    fn delivered_only_accepts_returned() {
        assert_eq!(
            OrderStateMachine::valid_next_states(OrderStatus::Delivered),
            vec![OrderStatus::Returned]
        );
    }

    #[test]
    fn validate_transition_returns_error_for_invalid() {
        let result =
            OrderStateMachine::validate_transition(OrderStatus::Delivered, OrderStatus::Pending);
        assert!(result.is_err());
    }

    #[test]
    fn transition_error_reason_names_terminal_state() {
        let reason = OrderStateMachine::transition_error_reason(
            OrderStatus::Cancelled,
            OrderStatus::Shipped,
        );
        assert!(reason.contains("cancelled"));
    }
}

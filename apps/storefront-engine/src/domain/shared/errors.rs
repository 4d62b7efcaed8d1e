//! Domain errors shared across bounded contexts.

use std::fmt;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Business rule violation.
    BusinessRuleViolation {
        /// Rule name or code.
        rule: String,
        /// Description of the violation.
        message: String,
    },

    /// Entity not found.
    NotFound {
        /// Entity type.
        entity_type: String,
        /// Entity identifier.
        id: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::BusinessRuleViolation { rule, message } => {
                write!(f, "Business rule '{rule}' violated: {message}")
            }
            Self::NotFound { entity_type, id } => {
                write!(f, "{entity_type} not found: {id}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = DomainError::InvalidValue {
            field: "quantity".to_string(),
            message: "must be at least 1".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("quantity"));
        assert!(msg.contains("at least 1"));
    }

    #[test]
    fn not_found_display() {
        let err = DomainError::NotFound {
            entity_type: "Product".to_string(),
            id: "prod-1".to_string(),
        };
        assert_eq!(format!("{err}"), "Product not found: prod-1");
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::BusinessRuleViolation {
            rule: "DEPOSIT_MINIMUM".to_string(),
            message: "below half of total".to_string(),
        });
        assert!(!err.to_string().is_empty());
    }
}

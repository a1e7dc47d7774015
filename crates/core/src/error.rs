//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant describes a deterministic, business-level rejection. A call
/// that returns one of these has not mutated any state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. freshness out of range).
    #[error("validation failed: {0}")]
    Validation(String),

    /// More units were requested than the inventory currently holds.
    #[error("insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory { requested: usize, available: usize },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_inventory(requested: usize, available: usize) -> Self {
        Self::InsufficientInventory {
            requested,
            available,
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = DomainError::validation("freshness must be between 0 and 10");
        assert_eq!(
            err.to_string(),
            "validation failed: freshness must be between 0 and 10"
        );

        let err = DomainError::insufficient_inventory(3, 1);
        assert_eq!(
            err.to_string(),
            "insufficient inventory: requested 3, available 1"
        );
        assert!(!err.is_validation());
    }
}

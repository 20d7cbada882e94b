//! Roster error types
//!
//! The roster has no I/O, so every error here is a rejected input.

use thiserror::Error;

/// Errors raised while validating employee input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    /// Name was empty after trimming
    #[error("Employee name cannot be empty")]
    EmptyName,

    /// Sales figure was below zero
    #[error("Sales amount cannot be negative: {0}")]
    NegativeSales(f64),

    /// Sales figure could not be read as a finite number
    #[error("Invalid sales amount: {0}")]
    InvalidSales(String),
}

/// Result type alias for roster operations
pub type RosterResult<T> = Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            RosterError::EmptyName.to_string(),
            "Employee name cannot be empty"
        );
        assert_eq!(
            RosterError::NegativeSales(-5.0).to_string(),
            "Sales amount cannot be negative: -5"
        );
        assert_eq!(
            RosterError::InvalidSales("abc".to_string()).to_string(),
            "Invalid sales amount: abc"
        );
    }
}

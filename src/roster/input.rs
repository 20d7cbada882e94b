//! Employee input validation
//!
//! Candidate entries from forms, API requests and CSV rows pass through here
//! before they reach the roster. The roster itself never validates.

use super::error::{RosterError, RosterResult};

/// A candidate employee entry that has passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeInput {
    pub name: String,
    pub sales: f64,
}

impl EmployeeInput {
    /// Validate a name and numeric sales figure.
    ///
    /// The name is trimmed and must be non-empty; sales must be finite and
    /// not below zero.
    pub fn new(name: &str, sales: f64) -> RosterResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }

        if !sales.is_finite() {
            return Err(RosterError::InvalidSales(sales.to_string()));
        }

        if sales < 0.0 {
            return Err(RosterError::NegativeSales(sales));
        }

        Ok(Self {
            name: name.to_string(),
            sales,
        })
    }

    /// Validate raw text as typed into a form or read from a file.
    ///
    /// Thousands separators in the sales text are ignored.
    pub fn parse(name: &str, sales: &str) -> RosterResult<Self> {
        let cleaned: String = sales
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();

        let value: f64 = cleaned
            .parse()
            .map_err(|_| RosterError::InvalidSales(sales.trim().to_string()))?;

        Self::new(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_is_trimmed() {
        let input = EmployeeInput::new("  Meera ", 51_000.0).unwrap();
        assert_eq!(input.name, "Meera");
        assert_eq!(input.sales, 51_000.0);
    }

    #[test]
    fn test_zero_sales_is_allowed() {
        assert!(EmployeeInput::new("Ravi", 0.0).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(EmployeeInput::new("", 10.0), Err(RosterError::EmptyName));
        assert_eq!(EmployeeInput::new("   ", 10.0), Err(RosterError::EmptyName));
    }

    #[test]
    fn test_negative_sales_rejected() {
        assert_eq!(
            EmployeeInput::new("Ravi", -1.0),
            Err(RosterError::NegativeSales(-1.0))
        );
    }

    #[test]
    fn test_non_finite_sales_rejected() {
        assert!(matches!(
            EmployeeInput::new("Ravi", f64::NAN),
            Err(RosterError::InvalidSales(_))
        ));
        assert!(matches!(
            EmployeeInput::new("Ravi", f64::INFINITY),
            Err(RosterError::InvalidSales(_))
        ));
    }

    #[test]
    fn test_parse_text() {
        let input = EmployeeInput::parse("Arun", " 60,000 ").unwrap();
        assert_eq!(input.sales, 60_000.0);

        let input = EmployeeInput::parse("Arun", "1234.5").unwrap();
        assert_eq!(input.sales, 1_234.5);

        assert!(matches!(
            EmployeeInput::parse("Arun", "lots"),
            Err(RosterError::InvalidSales(_))
        ));
        assert!(matches!(
            EmployeeInput::parse("Arun", ""),
            Err(RosterError::InvalidSales(_))
        ));
        assert_eq!(
            EmployeeInput::parse("Arun", "-20"),
            Err(RosterError::NegativeSales(-20.0))
        );
    }
}

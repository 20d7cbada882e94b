//! Currency formatting
//!
//! Amounts are printed with at most three fraction digits (trailing zeros
//! dropped), grouped with thousands separators, and prefixed with a symbol.

use serde::{Deserialize, Serialize};

/// How integer digits are grouped
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// 1,234,567
    #[default]
    Western,
    /// 12,34,567
    Indian,
}

impl std::str::FromStr for Grouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "western" | "international" => Ok(Grouping::Western),
            "indian" | "lakh" => Ok(Grouping::Indian),
            _ => Err(format!("Invalid grouping: {}. Use western or indian", s)),
        }
    }
}

/// Currency display settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyFormat {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default)]
    pub grouping: Grouping,
}

fn default_symbol() -> String {
    "₹".to_string()
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            grouping: Grouping::default(),
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, grouping: Grouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    /// Format an amount, e.g. `₹100,000` or `₹5,500.5`
    pub fn format(&self, amount: f64) -> String {
        format!("{}{}", self.symbol, group_number(amount, self.grouping))
    }
}

/// Group the digits of a number without any symbol
pub fn group_number(amount: f64, grouping: Grouping) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let grouped = group_digits(int_part, grouping);
    let sign = if amount < 0.0 && (grouped != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let group = match grouping {
        Grouping::Western => 3,
        Grouping::Indian => 2,
    };

    let mut parts: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        parts.push(&head[start..end]);
        end = start;
    }
    parts.reverse();

    format!("{},{}", parts.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_western_grouping() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(0.0), "₹0");
        assert_eq!(fmt.format(999.0), "₹999");
        assert_eq!(fmt.format(6_000.0), "₹6,000");
        assert_eq!(fmt.format(100_000.0), "₹100,000");
        assert_eq!(fmt.format(1_234_567.0), "₹1,234,567");
    }

    #[test]
    fn test_indian_grouping() {
        let fmt = CurrencyFormat::new("₹", Grouping::Indian);
        assert_eq!(fmt.format(6_000.0), "₹6,000");
        assert_eq!(fmt.format(100_000.0), "₹1,00,000");
        assert_eq!(fmt.format(12_345_678.0), "₹1,23,45,678");
    }

    #[test]
    fn test_fraction_digits() {
        let fmt = CurrencyFormat::new("$", Grouping::Western);
        assert_eq!(fmt.format(5_500.5), "$5,500.5");
        assert_eq!(fmt.format(5_200.25), "$5,200.25");
        assert_eq!(fmt.format(1.23456), "$1.235");
        assert_eq!(fmt.format(5_100.0001), "$5,100");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(group_number(-1_500.0, Grouping::Western), "-1,500");
        assert_eq!(group_number(-0.0, Grouping::Western), "0");
    }

    #[test]
    fn test_grouping_from_str() {
        assert_eq!("Indian".parse::<Grouping>(), Ok(Grouping::Indian));
        assert_eq!("western".parse::<Grouping>(), Ok(Grouping::Western));
        assert!("roman".parse::<Grouping>().is_err());
    }
}

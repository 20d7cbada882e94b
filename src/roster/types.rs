//! Core data types for the roster
//!
//! - `CommissionPolicy`: the threshold/rate rule that derives commission from sales
//! - `EmployeeRecord`: one employee's name, sales figure and derived commission

use serde::{Deserialize, Serialize};

/// Sales level that must be exceeded before any commission is paid
pub const DEFAULT_THRESHOLD: f64 = 50_000.0;

/// Fraction of sales paid as commission above the threshold
pub const DEFAULT_RATE: f64 = 0.1;

/// Commission rule: `sales * rate` when `sales > threshold`, otherwise zero.
///
/// The threshold itself is excluded, so a figure exactly at the threshold
/// earns nothing. No rounding is applied to the result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CommissionPolicy {
    /// Sales must be strictly greater than this to qualify
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Multiplier applied to the full sales figure once qualified
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_rate() -> f64 {
    DEFAULT_RATE
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            rate: DEFAULT_RATE,
        }
    }
}

impl CommissionPolicy {
    pub fn new(threshold: f64, rate: f64) -> Self {
        Self { threshold, rate }
    }

    /// Commission earned on a sales figure
    pub fn commission_for(&self, sales: f64) -> f64 {
        if sales > self.threshold {
            sales * self.rate
        } else {
            0.0
        }
    }
}

/// Commission under the default 50,000 / 10% rule
pub fn commission_rule(sales: f64) -> f64 {
    CommissionPolicy::default().commission_for(sales)
}

/// A single employee entry in the roster
///
/// Commission is derived once at construction and never changes; there is
/// no way to build or mutate a record that breaks that relationship.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmployeeRecord {
    name: String,
    sales: f64,
    commission: f64,
}

impl EmployeeRecord {
    /// Create a record, deriving commission from the given policy
    pub fn new(name: impl Into<String>, sales: f64, policy: &CommissionPolicy) -> Self {
        Self {
            name: name.into(),
            sales,
            commission: policy.commission_for(sales),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sales(&self) -> f64 {
        self.sales
    }

    pub fn commission(&self) -> f64 {
        self.commission
    }

    /// Whether this employee earned any commission
    pub fn is_qualified(&self) -> bool {
        self.commission > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_earns_nothing() {
        for sales in [0.0, 1.0, 40_000.0, 49_999.99, 50_000.0] {
            assert_eq!(commission_rule(sales), 0.0, "sales = {}", sales);
        }
    }

    #[test]
    fn test_above_threshold_earns_rate() {
        for sales in [50_000.01, 52_000.0, 60_000.0, 1_000_000.0] {
            assert_eq!(commission_rule(sales), sales * 0.1, "sales = {}", sales);
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(commission_rule(50_000.0), 0.0);
        assert!(commission_rule(50_000.5) > 0.0);
    }

    #[test]
    fn test_custom_policy() {
        let policy = CommissionPolicy::new(1_000.0, 0.25);
        assert_eq!(policy.commission_for(1_000.0), 0.0);
        assert_eq!(policy.commission_for(2_000.0), 500.0);
    }

    #[test]
    fn test_record_derives_commission() {
        let policy = CommissionPolicy::default();
        let arun = EmployeeRecord::new("Arun", 60_000.0, &policy);
        assert_eq!(arun.name(), "Arun");
        assert_eq!(arun.sales(), 60_000.0);
        assert_eq!(arun.commission(), 6_000.0);
        assert!(arun.is_qualified());

        let priya = EmployeeRecord::new("Priya", 40_000.0, &policy);
        assert_eq!(priya.commission(), 0.0);
        assert!(!priya.is_qualified());
    }

    #[test]
    fn test_policy_deserialize_defaults() {
        let policy: CommissionPolicy = toml::from_str("").unwrap();
        assert_eq!(policy, CommissionPolicy::default());

        let policy: CommissionPolicy = toml::from_str("rate = 0.05").unwrap();
        assert_eq!(policy.threshold, DEFAULT_THRESHOLD);
        assert_eq!(policy.rate, 0.05);
    }
}

//! Summary statistics over a roster

use serde::{Deserialize, Serialize};

use super::types::EmployeeRecord;

/// Aggregate counters shown on the dashboard summary cards
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RosterStats {
    /// Number of records
    pub total_employees: usize,
    /// Sum of all sales figures
    pub total_sales: f64,
    /// Sum of all commissions
    pub total_commission: f64,
    /// Number of records with commission above zero
    pub qualified: usize,
}

impl RosterStats {
    /// Compute all counters in a single pass. Nothing is cached.
    pub fn compute(records: &[EmployeeRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            acc.total_employees += 1;
            acc.total_sales += record.sales();
            acc.total_commission += record.commission();
            if record.is_qualified() {
                acc.qualified += 1;
            }
            acc
        })
    }
}

impl std::fmt::Display for RosterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "employees={}, sales={}, commission={}, qualified={}",
            self.total_employees, self.total_sales, self.total_commission, self.qualified
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::types::CommissionPolicy;

    #[test]
    fn test_seed_aggregation() {
        let policy = CommissionPolicy::default();
        let records = vec![
            EmployeeRecord::new("Arun", 60_000.0, &policy),
            EmployeeRecord::new("Priya", 40_000.0, &policy),
        ];

        let stats = RosterStats::compute(&records);
        assert_eq!(stats.total_employees, 2);
        assert_eq!(stats.total_sales, 100_000.0);
        assert_eq!(stats.total_commission, 6_000.0);
        assert_eq!(stats.qualified, 1);
    }

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(RosterStats::compute(&[]), RosterStats::default());
        let stats = RosterStats::compute(&[]);
        assert_eq!(stats.total_employees, 0);
        assert_eq!(stats.total_sales, 0.0);
        assert_eq!(stats.total_commission, 0.0);
        assert_eq!(stats.qualified, 0);
    }
}

//! Summary card view

use serde::{Deserialize, Serialize};

use super::currency::CurrencyFormat;
use crate::roster::RosterStats;

/// The four summary counters, ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryView {
    pub total_employees: usize,
    pub total_sales: String,
    pub total_commission: String,
    pub qualified: usize,
}

impl SummaryView {
    pub fn build(stats: &RosterStats, currency: &CurrencyFormat) -> Self {
        Self {
            total_employees: stats.total_employees,
            total_sales: currency.format(stats.total_sales),
            total_commission: currency.format(stats.total_commission),
            qualified: stats.qualified,
        }
    }
}

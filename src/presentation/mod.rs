//! Tally Presentation
//!
//! Turns a `RosterSnapshot` into the three dashboard views and provides the
//! adapters every front end shares:
//!
//! - **currency**: Grouped currency formatting
//! - **summary**: Summary counters
//! - **table**: Ranked table rows or the "no data" placeholder
//! - **chart**: Dual-axis bar chart and the drawing-resource slot
//! - **confirm**: Confirmation before clearing
//! - **terminal**: Plain-text rendering

pub mod chart;
pub mod confirm;
pub mod currency;
pub mod summary;
pub mod table;
pub mod terminal;

pub use chart::{AxisId, BarChart, ChartAxis, ChartDataset, ChartHandle, ChartSlot};
pub use confirm::{clear_with_confirmation, Confirm, PromptConfirm, CLEAR_PROMPT};
pub use currency::{group_number, CurrencyFormat, Grouping};
pub use summary::SummaryView;
pub use table::{TableRow, TableView, EMPTY_TABLE_MESSAGE, TABLE_HEADERS};
pub use terminal::{render_summary, render_table, TerminalChart};

use serde::{Deserialize, Serialize};

use crate::roster::RosterSnapshot;

/// Everything a renderer needs after a refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub epoch: String,
    pub revision: u64,
    pub summary: SummaryView,
    pub table: TableView,
    /// Absent when the roster is empty
    pub chart: Option<BarChart>,
}

impl DashboardView {
    pub fn build(snapshot: &RosterSnapshot, currency: &CurrencyFormat) -> Self {
        Self {
            epoch: snapshot.epoch.clone(),
            revision: snapshot.revision,
            summary: SummaryView::build(&snapshot.stats, currency),
            table: TableView::build(&snapshot.ranked, currency),
            chart: BarChart::build(&snapshot.ranked, currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CommissionPolicy, Roster};

    #[test]
    fn test_empty_dashboard() {
        let mut roster = Roster::seeded(CommissionPolicy::default());
        let snapshot = roster.clear_all();
        let view = DashboardView::build(&snapshot, &CurrencyFormat::default());

        assert_eq!(view.summary.total_employees, 0);
        assert_eq!(view.summary.total_sales, "₹0");
        assert!(view.table.is_placeholder());
        assert!(view.chart.is_none());
    }

    #[test]
    fn test_seeded_dashboard() {
        let roster = Roster::seeded(CommissionPolicy::default());
        let view = DashboardView::build(&roster.snapshot(), &CurrencyFormat::default());

        assert_eq!(view.summary.total_sales, "₹100,000");
        assert_eq!(view.summary.total_commission, "₹6,000");
        assert_eq!(view.table.rows().len(), 2);
        assert_eq!(view.chart.map(|c| c.labels), Some(vec!["Arun".to_string(), "Priya".to_string()]));
    }

    #[test]
    fn test_dashboard_json_roundtrip() {
        let roster = Roster::seeded(CommissionPolicy::default());
        let view = DashboardView::build(&roster.snapshot(), &CurrencyFormat::default());
        let json = serde_json::to_string(&view).unwrap();
        let parsed: DashboardView = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, view);
    }
}

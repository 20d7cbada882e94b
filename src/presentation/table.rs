//! Ranked table view
//!
//! Columns: position, name, sales, commission, status. An empty roster
//! produces a single placeholder row instead.

use serde::{Deserialize, Serialize};

use super::currency::CurrencyFormat;
use crate::roster::{PerformanceLabel, RankedEntry, RowStyle};

/// Text of the placeholder row shown when the roster is empty
pub const EMPTY_TABLE_MESSAGE: &str =
    "No employee data available. Add employees to see the report.";

/// Number of columns in the table
pub const TABLE_COLUMNS: usize = 5;

/// Column headers in display order
pub const TABLE_HEADERS: [&str; TABLE_COLUMNS] =
    ["Rank", "Employee Name", "Sales Amount", "Commission", "Status"];

/// A single rendered table row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableRow {
    /// 1-based rank
    pub position: usize,
    pub name: String,
    pub sales: String,
    pub commission: String,
    pub label: PerformanceLabel,
    /// Status text including its badge, e.g. "🏆 Top Performer"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<RowStyle>,
}

/// The table body: either ranked rows or the "no data" placeholder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableView {
    Rows { rows: Vec<TableRow> },
    Placeholder { message: String },
}

impl TableView {
    pub fn build(ranked: &[RankedEntry], currency: &CurrencyFormat) -> Self {
        if ranked.is_empty() {
            return TableView::Placeholder {
                message: EMPTY_TABLE_MESSAGE.to_string(),
            };
        }

        let rows = ranked
            .iter()
            .map(|entry| TableRow {
                position: entry.rank,
                name: entry.name.clone(),
                sales: currency.format(entry.sales),
                commission: currency.format(entry.commission),
                label: entry.label,
                status: status_text(entry.label),
                style: entry.label.row_style(),
            })
            .collect();

        TableView::Rows { rows }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TableView::Placeholder { .. })
    }

    /// Rows, or an empty slice for the placeholder
    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableView::Rows { rows } => rows,
            TableView::Placeholder { .. } => &[],
        }
    }
}

fn status_text(label: PerformanceLabel) -> String {
    match label.badge() {
        Some(badge) => format!("{} {}", badge, label),
        None => label.to_string(),
    }
}

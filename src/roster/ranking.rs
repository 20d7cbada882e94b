//! Ranked view of the roster
//!
//! Records are copied and sorted by sales descending. The sort is stable, so
//! employees with equal sales keep their insertion order. Each position is
//! then given a performance label.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::types::EmployeeRecord;

/// Performance label assigned to a ranked position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLabel {
    /// First place with commission
    TopPerformer,
    /// Second place with commission
    HighPerformer,
    /// Third place with commission
    GoodPerformer,
    /// Any later place with commission
    Qualified,
    /// No commission, regardless of place
    NoCommission,
}

/// Table row styling for the podium positions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RowStyle {
    TopPerformer,
    HighPerformer,
    GoodPerformer,
}

impl RowStyle {
    /// CSS class name used by renderers
    pub fn class_name(&self) -> &'static str {
        match self {
            RowStyle::TopPerformer => "top-performer",
            RowStyle::HighPerformer => "high-performer",
            RowStyle::GoodPerformer => "good-performer",
        }
    }
}

impl PerformanceLabel {
    /// Label for a zero-based position in the sorted view
    pub fn for_position(position: usize, commission: f64) -> Self {
        if commission <= 0.0 {
            return PerformanceLabel::NoCommission;
        }

        match position {
            0 => PerformanceLabel::TopPerformer,
            1 => PerformanceLabel::HighPerformer,
            2 => PerformanceLabel::GoodPerformer,
            _ => PerformanceLabel::Qualified,
        }
    }

    /// Human-readable status text
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLabel::TopPerformer => "Top Performer",
            PerformanceLabel::HighPerformer => "High Performer",
            PerformanceLabel::GoodPerformer => "Good Performer",
            PerformanceLabel::Qualified => "Qualified",
            PerformanceLabel::NoCommission => "No Commission",
        }
    }

    /// Badge glyph shown before the status text
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            PerformanceLabel::TopPerformer => Some("🏆"),
            PerformanceLabel::HighPerformer => Some("🥈"),
            PerformanceLabel::GoodPerformer => Some("🥉"),
            PerformanceLabel::Qualified => Some("✅"),
            PerformanceLabel::NoCommission => None,
        }
    }

    /// Distinct row style, only for the three podium labels
    pub fn row_style(&self) -> Option<RowStyle> {
        match self {
            PerformanceLabel::TopPerformer => Some(RowStyle::TopPerformer),
            PerformanceLabel::HighPerformer => Some(RowStyle::HighPerformer),
            PerformanceLabel::GoodPerformer => Some(RowStyle::GoodPerformer),
            _ => None,
        }
    }
}

impl std::fmt::Display for PerformanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the ranked view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntry {
    /// 1-based position in the sorted view
    pub rank: usize,
    pub name: String,
    pub sales: f64,
    pub commission: f64,
    pub label: PerformanceLabel,
}

/// Build the ranked view without touching the source slice
pub fn rank(records: &[EmployeeRecord]) -> Vec<RankedEntry> {
    let mut sorted: Vec<&EmployeeRecord> = records.iter().collect();

    // `sort_by` is stable; NaN cannot get here because input is validated
    sorted.sort_by(|a, b| {
        b.sales()
            .partial_cmp(&a.sales())
            .unwrap_or(Ordering::Equal)
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(position, record)| RankedEntry {
            rank: position + 1,
            name: record.name().to_string(),
            sales: record.sales(),
            commission: record.commission(),
            label: PerformanceLabel::for_position(position, record.commission()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::types::CommissionPolicy;

    fn records(figures: &[(&str, f64)]) -> Vec<EmployeeRecord> {
        let policy = CommissionPolicy::default();
        figures
            .iter()
            .map(|(name, sales)| EmployeeRecord::new(*name, *sales, &policy))
            .collect()
    }

    #[test]
    fn test_sorted_by_sales_descending() {
        let roster = records(&[("a", 10.0), ("b", 30.0), ("c", 20.0)]);
        let ranked = rank(&roster);

        let names: Vec<_> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);

        let ranks: Vec<_> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let roster = records(&[
            ("first", 70_000.0),
            ("second", 70_000.0),
            ("low", 100.0),
            ("third", 70_000.0),
        ]);
        let ranked = rank(&roster);

        let names: Vec<_> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third", "low"]);
    }

    #[test]
    fn test_source_is_not_reordered() {
        let roster = records(&[("a", 10.0), ("b", 30.0)]);
        let before = roster.clone();
        let _ = rank(&roster);
        assert_eq!(roster, before);
    }

    #[test]
    fn test_podium_labels() {
        let roster = records(&[
            ("d", 40_000.0),
            ("b", 55_000.0),
            ("a", 60_000.0),
            ("c", 52_000.0),
        ]);
        let ranked = rank(&roster);

        let commissions: Vec<_> = ranked.iter().map(|e| e.commission).collect();
        assert_eq!(commissions, vec![6_000.0, 5_500.0, 5_200.0, 0.0]);

        let labels: Vec<_> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Top Performer", "High Performer", "Good Performer", "No Commission"]
        );
    }

    #[test]
    fn test_no_commission_overrides_podium() {
        let roster = records(&[("a", 30_000.0), ("b", 20_000.0)]);
        let ranked = rank(&roster);
        assert!(ranked
            .iter()
            .all(|e| e.label == PerformanceLabel::NoCommission));
    }

    #[test]
    fn test_qualified_after_third_place() {
        let roster = records(&[
            ("a", 90_000.0),
            ("b", 80_000.0),
            ("c", 70_000.0),
            ("d", 60_000.0),
            ("e", 10_000.0),
        ]);
        let ranked = rank(&roster);
        assert_eq!(ranked[3].label, PerformanceLabel::Qualified);
        assert_eq!(ranked[4].label, PerformanceLabel::NoCommission);
    }

    #[test]
    fn test_empty_roster_ranks_empty() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn test_label_presentation() {
        assert_eq!(PerformanceLabel::TopPerformer.badge(), Some("🏆"));
        assert_eq!(PerformanceLabel::NoCommission.badge(), None);
        assert_eq!(
            PerformanceLabel::GoodPerformer.row_style().map(|s| s.class_name()),
            Some("good-performer")
        );
        assert_eq!(PerformanceLabel::Qualified.row_style(), None);
        assert_eq!(PerformanceLabel::HighPerformer.to_string(), "High Performer");
    }

    #[test]
    fn test_label_serializes_snake_case() {
        let json = serde_json::to_string(&PerformanceLabel::TopPerformer).unwrap();
        assert_eq!(json, "\"top_performer\"");
    }
}

//! Plain-text rendering of the dashboard views
//!
//! Used by the interactive `tally` binary and the CLI client.

use super::chart::{AxisId, BarChart, ChartHandle};
use super::summary::SummaryView;
use super::table::{TableView, TABLE_HEADERS};

/// Render the four summary counters
pub fn render_summary(summary: &SummaryView) -> String {
    format!(
        "Total Employees:  {}\nTotal Sales:      {}\nTotal Commission: {}\nQualified:        {}\n",
        summary.total_employees, summary.total_sales, summary.total_commission, summary.qualified
    )
}

/// Render the ranked table, or the placeholder row
pub fn render_table(table: &TableView) -> String {
    let rows = match table {
        TableView::Placeholder { message } => return format!("{}\n", message),
        TableView::Rows { rows } => rows,
    };

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            let marker = if row.style.is_some() { "*" } else { " " };
            [
                format!("{}{}", row.position, marker),
                row.name.clone(),
                row.sales.clone(),
                row.commission.clone(),
                row.status.clone(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &TABLE_HEADERS.map(String::from), &widths);
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// A chart drawn as text bars, two per employee on independent scales
pub struct TerminalChart {
    lines: Vec<String>,
}

impl TerminalChart {
    /// Draw the chart with bars at most `width` characters long
    pub fn draw(chart: &BarChart, width: usize) -> Self {
        let name_width = chart
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for dataset in &chart.datasets {
            let axis_max = chart.axis_max(dataset.axis);
            let glyph = match dataset.axis {
                AxisId::Y => '█',
                AxisId::Y1 => '▒',
            };
            lines.push(format!("{} {}", glyph, dataset.label));
            for (label, value) in chart.labels.iter().zip(dataset.data.iter()) {
                let len = bar_length(*value, axis_max, width);
                let pad = name_width - label.chars().count();
                lines.push(format!(
                    "  {}{} │{} {}",
                    label,
                    " ".repeat(pad),
                    glyph.to_string().repeat(len),
                    value
                ));
            }
        }

        Self { lines }
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

impl ChartHandle for TerminalChart {
    fn dispose(&mut self) {
        self.lines.clear();
    }
}

fn bar_length(value: f64, axis_max: f64, width: usize) -> usize {
    if axis_max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / axis_max) * width as f64).round().max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::CurrencyFormat;
    use crate::roster::{CommissionPolicy, Roster};

    #[test]
    fn test_render_placeholder() {
        let table = TableView::build(&[], &CurrencyFormat::default());
        let text = render_table(&table);
        assert!(text.starts_with("No employee data available"));
    }

    #[test]
    fn test_render_rows() {
        let roster = Roster::seeded(CommissionPolicy::default());
        let table = TableView::build(&roster.ranked(), &CurrencyFormat::default());
        let text = render_table(&table);

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Rank"));
        assert!(lines[2].contains("Arun"));
        assert!(lines[2].contains("₹60,000"));
        assert!(lines[3].contains("No Commission"));
    }

    #[test]
    fn test_chart_scales_independently() {
        let roster = Roster::seeded(CommissionPolicy::default());
        let chart = BarChart::build(&roster.ranked(), &CurrencyFormat::default()).unwrap();
        let drawn = TerminalChart::draw(&chart, 10);
        let text = drawn.render();

        // Arun tops both axes, so both of his bars are full width
        assert!(text.contains(&format!("Arun  │{} 60000", "█".repeat(10))));
        assert!(text.contains(&format!("Arun  │{} 6000", "▒".repeat(10))));
        // Priya: 40000 / 60000 of the sales axis, nothing on commission
        assert!(text.contains(&format!("Priya │{} 40000", "█".repeat(7))));
        assert!(text.contains("Priya │ 0"));
    }

    #[test]
    fn test_dispose_clears_drawing() {
        let roster = Roster::seeded(CommissionPolicy::default());
        let chart = BarChart::build(&roster.ranked(), &CurrencyFormat::default()).unwrap();
        let mut drawn = TerminalChart::draw(&chart, 10);
        drawn.dispose();
        assert!(drawn.render().is_empty());
    }
}

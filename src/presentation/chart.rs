//! Dual-axis bar chart view and drawing-resource lifecycle
//!
//! The chart view is a category axis of employee names in ranked order and
//! two series on independent value axes: sales on `y` (left) and commission
//! on `y1` (right). An empty roster yields no chart at all.
//!
//! `ChartSlot` owns at most one live drawing. Every refresh disposes the
//! previous drawing before a new one is built.

use serde::{Deserialize, Serialize};

use super::currency::CurrencyFormat;
use crate::roster::RankedEntry;

/// Which value axis a series is plotted against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    /// Left axis
    Y,
    /// Right axis
    Y1,
}

/// One value axis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartAxis {
    pub id: AxisId,
    pub title: String,
    /// "left" or "right"
    pub position: String,
    /// Draw grid lines across the plot area
    pub grid: bool,
}

/// One bar series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub axis: AxisId,
    /// Hover text per bar, `"<label>: <amount>"`
    pub tooltips: Vec<String>,
    /// Fill color
    pub color: String,
    pub border_color: String,
}

impl ChartDataset {
    fn new(
        label: String,
        data: Vec<f64>,
        axis: AxisId,
        colors: (&str, &str),
        currency: &CurrencyFormat,
    ) -> Self {
        let tooltips = data
            .iter()
            .map(|value| format!("{}: {}", label, currency.format(*value)))
            .collect();

        Self {
            label,
            data,
            axis,
            tooltips,
            color: colors.0.to_string(),
            border_color: colors.1.to_string(),
        }
    }
}

/// Grouped bar chart of sales and commission per employee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub axes: Vec<ChartAxis>,
}

const SALES_COLOR: &str = "rgba(52, 152, 219, 0.8)";
const SALES_BORDER: &str = "rgba(52, 152, 219, 1)";
const COMMISSION_COLOR: &str = "rgba(46, 204, 113, 0.8)";
const COMMISSION_BORDER: &str = "rgba(46, 204, 113, 1)";

impl BarChart {
    /// Build the chart, or `None` for an empty ranked view
    pub fn build(ranked: &[RankedEntry], currency: &CurrencyFormat) -> Option<Self> {
        if ranked.is_empty() {
            return None;
        }

        let sales_title = format!("Sales Amount ({})", currency.symbol);
        let commission_title = format!("Commission ({})", currency.symbol);

        Some(Self {
            labels: ranked.iter().map(|e| e.name.clone()).collect(),
            datasets: vec![
                ChartDataset::new(
                    sales_title.clone(),
                    ranked.iter().map(|e| e.sales).collect(),
                    AxisId::Y,
                    (SALES_COLOR, SALES_BORDER),
                    currency,
                ),
                ChartDataset::new(
                    commission_title.clone(),
                    ranked.iter().map(|e| e.commission).collect(),
                    AxisId::Y1,
                    (COMMISSION_COLOR, COMMISSION_BORDER),
                    currency,
                ),
            ],
            axes: vec![
                ChartAxis {
                    id: AxisId::Y,
                    title: sales_title,
                    position: "left".to_string(),
                    grid: true,
                },
                ChartAxis {
                    id: AxisId::Y1,
                    title: commission_title,
                    position: "right".to_string(),
                    grid: false,
                },
            ],
        })
    }

    /// Highest value plotted against an axis (0 when nothing is plotted)
    pub fn axis_max(&self, axis: AxisId) -> f64 {
        self.datasets
            .iter()
            .filter(|d| d.axis == axis)
            .flat_map(|d| d.data.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// A live drawing produced from a `BarChart`
pub trait ChartHandle {
    /// Release whatever the drawing holds
    fn dispose(&mut self);
}

/// Holder for the single current chart drawing
pub struct ChartSlot<H: ChartHandle> {
    current: Option<H>,
}

impl<H: ChartHandle> Default for ChartSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ChartHandle> ChartSlot<H> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Dispose the previous drawing, then build a new one if there is a chart
    pub fn refresh<F>(&mut self, chart: Option<&BarChart>, build: F)
    where
        F: FnOnce(&BarChart) -> H,
    {
        if let Some(mut previous) = self.current.take() {
            previous.dispose();
        }

        if let Some(chart) = chart {
            self.current = Some(build(chart));
        }
    }

    pub fn current(&self) -> Option<&H> {
        self.current.as_ref()
    }

    pub fn is_drawn(&self) -> bool {
        self.current.is_some()
    }
}

impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        if let Some(mut current) = self.current.take() {
            current.dispose();
        }
    }
}

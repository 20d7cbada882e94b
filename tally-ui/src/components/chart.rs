//! Chart Component
//!
//! Grouped bar chart on an HTML5 canvas: one category per employee in
//! ranked order, sales against the left axis and commission against the
//! right axis, each scaled independently.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::{BarChart, GlobalState};

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 70.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 50.0;
const GRID_LINES: usize = 5;
/// Share of each category slot filled by bars
const GROUP_FILL: f64 = 0.8;
/// Pixels above a bar that still count as hovering it
const HOVER_SLOP: f64 = 4.0;

/// Plot area inside the canvas margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0),
            height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// One bar, in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub dataset: usize,
    pub category: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Place every bar. Each dataset is scaled against the maximum of its own
/// axis; an axis whose maximum is zero draws zero-height bars.
pub fn bar_layout(chart: &BarChart, plot: PlotArea) -> Vec<BarRect> {
    let categories = chart.labels.len();
    let series = chart.datasets.len();
    if categories == 0 || series == 0 {
        return Vec::new();
    }

    let slot = plot.width / categories as f64;
    let bar_width = slot * GROUP_FILL / series as f64;
    let group_offset = slot * (1.0 - GROUP_FILL) / 2.0;

    let mut bars = Vec::with_capacity(categories * series);
    for (dataset_idx, dataset) in chart.datasets.iter().enumerate() {
        let max = chart.axis_max(&dataset.axis);
        for (category, value) in dataset.data.iter().enumerate().take(categories) {
            let height = if max > 0.0 {
                (value / max).clamp(0.0, 1.0) * plot.height
            } else {
                0.0
            };
            bars.push(BarRect {
                dataset: dataset_idx,
                category,
                x: plot.left + category as f64 * slot + group_offset + dataset_idx as f64 * bar_width,
                y: plot.bottom() - height,
                width: bar_width,
                height,
            });
        }
    }
    bars
}

/// The bar under a canvas point, if any
pub fn bar_at(bars: &[BarRect], x: f64, y: f64) -> Option<&BarRect> {
    bars.iter().find(|bar| {
        x >= bar.x
            && x <= bar.x + bar.width
            && y >= bar.y - HOVER_SLOP
            && y <= bar.y + bar.height
    })
}

/// Hover text for a bar: `"<series>: <amount>"`
pub fn tooltip_text(chart: &BarChart, bar: &BarRect) -> Option<String> {
    let dataset = chart.datasets.get(bar.dataset)?;
    match dataset.tooltips.get(bar.category) {
        Some(text) => Some(text.clone()),
        None => {
            let value = dataset.data.get(bar.category)?;
            Some(format!("{}: {}", dataset.label, value))
        }
    }
}

/// Short axis label: 60000 -> "60k", 1500000 -> "1.5M"
pub fn format_tick(value: f64) -> String {
    let trim = |v: f64| {
        let s = format!("{:.1}", v);
        s.trim_end_matches(".0").to_string()
    };

    if value >= 1_000_000.0 {
        format!("{}M", trim(value / 1_000_000.0))
    } else if value >= 1_000.0 {
        format!("{}k", trim(value / 1_000.0))
    } else {
        trim(value)
    }
}

/// The drawing currently on the canvas
pub struct CanvasChart {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasChart {
    /// Take the 2D context of a canvas
    pub fn attach(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Wipe everything this drawing put on the canvas
    pub fn dispose(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    pub fn draw(&self, chart: &BarChart) {
        let ctx = &self.ctx;
        let plot = PlotArea::for_canvas(self.width, self.height);

        ctx.set_font("12px sans-serif");

        // Grid lines and ticks; the left axis owns the grid
        for i in 0..=GRID_LINES {
            let fraction = i as f64 / GRID_LINES as f64;
            let y = plot.bottom() - fraction * plot.height;

            if chart.axes.iter().any(|a| a.grid) {
                ctx.set_stroke_style(&"#374151".into()); // gray-700
                ctx.set_line_width(1.0);
                ctx.begin_path();
                ctx.move_to(plot.left, y);
                ctx.line_to(plot.left + plot.width, y);
                ctx.stroke();
            }

            ctx.set_fill_style(&"#9ca3af".into()); // gray-400
            for axis in &chart.axes {
                let label = format_tick(chart.axis_max(&axis.id) * fraction);
                let x = if axis.position == "right" {
                    plot.left + plot.width + 8.0
                } else {
                    let measured = ctx.measure_text(&label).map(|m| m.width()).unwrap_or(0.0);
                    plot.left - 8.0 - measured
                };
                let _ = ctx.fill_text(&label, x, y + 4.0);
            }
        }

        // Bars
        for bar in bar_layout(chart, plot) {
            let dataset = &chart.datasets[bar.dataset];
            ctx.set_fill_style(&dataset.color.as_str().into());
            ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);
            ctx.set_stroke_style(&dataset.border_color.as_str().into());
            ctx.set_line_width(1.0);
            ctx.stroke_rect(bar.x, bar.y, bar.width, bar.height);
        }

        // Category labels
        ctx.set_fill_style(&"#d1d5db".into()); // gray-300
        let slot = plot.width / chart.labels.len().max(1) as f64;
        for (i, name) in chart.labels.iter().enumerate() {
            let measured = ctx.measure_text(name).map(|m| m.width()).unwrap_or(0.0);
            let x = plot.left + (i as f64 + 0.5) * slot - measured / 2.0;
            let _ = ctx.fill_text(name, x, plot.bottom() + 20.0);
        }
    }
}

/// Sales and commission chart component
#[component]
pub fn Chart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // The previous drawing is disposed before every redraw
    create_effect(move |previous: Option<Option<CanvasChart>>| {
        let chart = state.dashboard.with(|view| view.as_ref().and_then(|v| v.chart.clone()));

        if let Some(Some(old)) = previous {
            old.dispose();
        }

        let canvas = canvas_ref.get()?;
        let chart = chart?;
        let drawing = CanvasChart::attach(&canvas)?;
        drawing.draw(&chart);
        Some(drawing)
    });

    let hovered = create_rw_signal(None::<String>);

    // Pointer position is in CSS pixels; the layout is in canvas pixels
    let on_mouse_move = move |ev: ev::MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let (width, height) = (canvas.width() as f64, canvas.height() as f64);
        let x = ev.offset_x() as f64 * width / canvas.client_width().max(1) as f64;
        let y = ev.offset_y() as f64 * height / canvas.client_height().max(1) as f64;

        let text = state.dashboard.with_untracked(|view| {
            let chart = view.as_ref()?.chart.as_ref()?;
            let bars = bar_layout(chart, PlotArea::for_canvas(width, height));
            bar_at(&bars, x, y).and_then(|bar| tooltip_text(chart, bar))
        });
        if text != hovered.get_untracked() {
            hovered.set(text);
        }
    };

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
                title=move || hovered.get().unwrap_or_default()
                on:mousemove=on_mouse_move
                on:mouseleave=move |_| hovered.set(None)
            />
            {move || hovered.get().map(|text| view! {
                <div class="absolute top-2 right-2 px-3 py-1 rounded bg-gray-900/90 text-sm text-gray-100 pointer-events-none">
                    {text}
                </div>
            })}
            <ChartLegend />
        </div>
    }
}

/// Legend showing series colors and axis sides
#[component]
fn ChartLegend() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {move || {
                state.dashboard.get()
                    .and_then(|view| view.chart)
                    .map(|chart| chart.datasets)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|dataset| {
                        let side = if dataset.axis == "y1" { "right axis" } else { "left axis" };
                        view! {
                            <div class="flex items-center space-x-2">
                                <div
                                    class="w-3 h-3 rounded-sm"
                                    style=format!("background-color: {}", dataset.color)
                                />
                                <span class="text-sm text-gray-300">{dataset.label}</span>
                                <span class="text-xs text-gray-500">{side}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::{ChartAxis, ChartDataset};

    fn chart(sales: Vec<f64>, commission: Vec<f64>) -> BarChart {
        let labels = (0..sales.len()).map(|i| format!("e{}", i)).collect();
        BarChart {
            labels,
            datasets: vec![
                ChartDataset {
                    label: "Sales Amount (₹)".to_string(),
                    data: sales,
                    axis: "y".to_string(),
                    tooltips: Vec::new(),
                    color: "blue".to_string(),
                    border_color: "blue".to_string(),
                },
                ChartDataset {
                    label: "Commission (₹)".to_string(),
                    data: commission,
                    axis: "y1".to_string(),
                    tooltips: Vec::new(),
                    color: "green".to_string(),
                    border_color: "green".to_string(),
                },
            ],
            axes: vec![
                ChartAxis {
                    id: "y".to_string(),
                    title: "Sales Amount (₹)".to_string(),
                    position: "left".to_string(),
                    grid: true,
                },
                ChartAxis {
                    id: "y1".to_string(),
                    title: "Commission (₹)".to_string(),
                    position: "right".to_string(),
                    grid: false,
                },
            ],
        }
    }

    const PLOT: PlotArea = PlotArea { left: 0.0, top: 0.0, width: 200.0, height: 100.0 };

    fn approx(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "{} != {}", actual, expected);
    }

    #[test]
    fn test_axes_scale_independently() {
        let bars = bar_layout(&chart(vec![60_000.0, 40_000.0], vec![6_000.0, 0.0]), PLOT);
        assert_eq!(bars.len(), 4);

        // Tallest bar on each axis fills the plot
        approx(bars[0].height, 100.0);
        approx(bars[2].height, 100.0);
        approx(bars[1].height, 200.0 / 3.0);
        approx(bars[3].height, 0.0);
    }

    #[test]
    fn test_bars_grouped_by_category() {
        let bars = bar_layout(&chart(vec![10.0, 20.0], vec![1.0, 2.0]), PLOT);
        // Slot 100 wide, bars 40 wide, 10 padding
        approx(bars[0].x, 10.0);
        approx(bars[2].x, 50.0);
        approx(bars[1].x, 110.0);
        approx(bars[3].x, 150.0);
    }

    #[test]
    fn test_zero_axis_draws_flat_bars() {
        let bars = bar_layout(&chart(vec![100.0], vec![0.0]), PLOT);
        approx(bars[1].height, 0.0);
        approx(bars[1].y, 100.0);
    }

    #[test]
    fn test_empty_chart_has_no_bars() {
        assert!(bar_layout(&chart(vec![], vec![]), PLOT).is_empty());
    }

    #[test]
    fn test_hover_finds_bar_and_series() {
        let mut chart = chart(vec![60_000.0, 40_000.0], vec![6_000.0, 0.0]);
        chart.datasets[0].tooltips = vec![
            "Sales Amount (₹): ₹60,000".to_string(),
            "Sales Amount (₹): ₹40,000".to_string(),
        ];
        let bars = bar_layout(&chart, PLOT);

        // Second employee's sales bar spans x 110..150
        let bar = bar_at(&bars, 120.0, 90.0).unwrap();
        assert_eq!((bar.dataset, bar.category), (0, 1));
        assert_eq!(
            tooltip_text(&chart, bar).as_deref(),
            Some("Sales Amount (₹): ₹40,000")
        );

        // Zero commission still answers just above the baseline
        let bar = bar_at(&bars, 160.0, 98.0).unwrap();
        assert_eq!((bar.dataset, bar.category), (1, 1));
        assert_eq!(tooltip_text(&chart, bar).as_deref(), Some("Commission (₹): 0"));

        // Gap between groups
        assert!(bar_at(&bars, 100.0, 90.0).is_none());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(750.0), "750");
        assert_eq!(format_tick(60_000.0), "60k");
        assert_eq!(format_tick(12_500.0), "12.5k");
        assert_eq!(format_tick(1_500_000.0), "1.5M");
    }
}

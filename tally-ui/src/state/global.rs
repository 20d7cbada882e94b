//! Global Application State
//!
//! Reactive state management using Leptos signals. The dashboard view is
//! fetched from the API already formatted, so this crate never computes
//! commissions or rankings itself.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Latest dashboard view from the API
    pub dashboard: RwSignal<Option<DashboardView>>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// Last time a roster update arrived
    pub last_sync: RwSignal<Option<i64>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Summary counters, currency already formatted
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct SummaryView {
    pub total_employees: usize,
    pub total_sales: String,
    pub total_commission: String,
    pub qualified: usize,
}

/// One ranked table row
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct TableRow {
    pub position: usize,
    pub name: String,
    pub sales: String,
    pub commission: String,
    pub status: String,
    /// CSS class for podium rows
    #[serde(default)]
    pub style: Option<String>,
}

/// Ranked rows, or the "no data" placeholder
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableView {
    Rows { rows: Vec<TableRow> },
    Placeholder { message: String },
}

/// One bar series
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    /// "y" (left) or "y1" (right)
    pub axis: String,
    /// Hover text per bar, already formatted by the server
    #[serde(default)]
    pub tooltips: Vec<String>,
    pub color: String,
    pub border_color: String,
}

/// One value axis
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct ChartAxis {
    pub id: String,
    pub title: String,
    pub position: String,
    pub grid: bool,
}

/// Grouped bar chart of sales and commission per employee
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub axes: Vec<ChartAxis>,
}

impl BarChart {
    /// Highest value plotted against an axis (0 when nothing is plotted)
    pub fn axis_max(&self, axis: &str) -> f64 {
        self.datasets
            .iter()
            .filter(|d| d.axis == axis)
            .flat_map(|d| d.data.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// Everything the dashboard page renders
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct DashboardView {
    /// Changes whenever the server starts over with a new roster
    pub epoch: String,
    pub revision: u64,
    pub summary: SummaryView,
    pub table: TableView,
    #[serde(default)]
    pub chart: Option<BarChart>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        dashboard: create_rw_signal(None),
        ws_connected: create_rw_signal(false),
        last_sync: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

/// Whether `(epoch, revision)` is ahead of the view on screen.
///
/// Revisions restart at 0 with every new epoch, so a view from another
/// epoch always wins. `or_equal` lets a same-revision refetch through.
pub fn is_ahead(current: Option<(&str, u64)>, epoch: &str, revision: u64, or_equal: bool) -> bool {
    match current {
        None => true,
        Some((current_epoch, _)) if current_epoch != epoch => true,
        Some((_, current)) if or_equal => revision >= current,
        Some((_, current)) => revision > current,
    }
}

/// Whether a fetched view should replace the one on screen
pub fn is_newer(current: Option<&DashboardView>, incoming: &DashboardView) -> bool {
    is_ahead(
        current.map(|view| (view.epoch.as_str(), view.revision)),
        &incoming.epoch,
        incoming.revision,
        true,
    )
}

impl GlobalState {
    /// Replace the dashboard view unless a newer one is already shown
    pub fn apply_dashboard(&self, view: DashboardView) {
        let current = self.dashboard.get_untracked();
        if is_newer(current.as_ref(), &view) {
            self.dashboard.set(Some(view));
        }
    }

    /// Whether a pushed `(epoch, revision)` is ahead of the view on screen
    pub fn is_behind(&self, epoch: &str, revision: u64) -> bool {
        self.dashboard.with_untracked(|view| {
            is_ahead(
                view.as_ref().map(|v| (v.epoch.as_str(), v.revision)),
                epoch,
                revision,
                false,
            )
        })
    }

    /// Fetch the dashboard view and show it
    pub fn refresh(&self) {
        let state = self.clone();
        spawn_local(async move {
            state.loading.set(true);
            match crate::api::fetch_dashboard().await {
                Ok(view) => state.apply_dashboard(view),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch dashboard: {}", e).into());
                    state.show_error(&e);
                }
            }
            state.loading.set(false);
        });
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHBOARD_JSON: &str = r#"{
        "epoch": "5f0c7d1e-run-a",
        "revision": 3,
        "summary": {"total_employees": 2, "total_sales": "₹100,000", "total_commission": "₹6,000", "qualified": 1},
        "table": {"kind": "rows", "rows": [
            {"position": 1, "name": "Arun", "sales": "₹60,000", "commission": "₹6,000",
             "label": "top_performer", "status": "🏆 Top Performer", "style": "top-performer"},
            {"position": 2, "name": "Priya", "sales": "₹40,000", "commission": "₹0",
             "label": "no_commission", "status": "No Commission"}
        ]},
        "chart": {
            "labels": ["Arun", "Priya"],
            "datasets": [
                {"label": "Sales Amount (₹)", "data": [60000.0, 40000.0], "axis": "y",
                 "tooltips": ["Sales Amount (₹): ₹60,000", "Sales Amount (₹): ₹40,000"],
                 "color": "rgba(52, 152, 219, 0.8)", "border_color": "rgba(52, 152, 219, 1)"},
                {"label": "Commission (₹)", "data": [6000.0, 0.0], "axis": "y1",
                 "color": "rgba(46, 204, 113, 0.8)", "border_color": "rgba(46, 204, 113, 1)"}
            ],
            "axes": [
                {"id": "y", "title": "Sales Amount (₹)", "position": "left", "grid": true},
                {"id": "y1", "title": "Commission (₹)", "position": "right", "grid": false}
            ]
        }
    }"#;

    fn view(revision: u64) -> DashboardView {
        view_in("run-a", revision)
    }

    fn view_in(epoch: &str, revision: u64) -> DashboardView {
        DashboardView {
            epoch: epoch.to_string(),
            revision,
            summary: SummaryView {
                total_employees: 0,
                total_sales: "₹0".to_string(),
                total_commission: "₹0".to_string(),
                qualified: 0,
            },
            table: TableView::Placeholder {
                message: "No employee data available.".to_string(),
            },
            chart: None,
        }
    }

    #[test]
    fn test_dashboard_parses_server_shape() {
        let parsed: DashboardView = serde_json::from_str(DASHBOARD_JSON).unwrap();
        assert_eq!(parsed.revision, 3);
        assert_eq!(parsed.summary.total_commission, "₹6,000");

        match &parsed.table {
            TableView::Rows { rows } => {
                assert_eq!(rows[0].style.as_deref(), Some("top-performer"));
                assert_eq!(rows[1].style, None);
            }
            TableView::Placeholder { .. } => panic!("Expected rows"),
        }

        let chart = parsed.chart.unwrap();
        assert_eq!(chart.axis_max("y"), 60_000.0);
        assert_eq!(chart.axis_max("y1"), 6_000.0);
        assert_eq!(chart.datasets[0].tooltips[1], "Sales Amount (₹): ₹40,000");
        assert!(chart.datasets[1].tooltips.is_empty());
    }

    #[test]
    fn test_empty_dashboard_has_no_chart() {
        let json = r#"{"epoch": "run-a", "revision": 1,
            "summary": {"total_employees": 0, "total_sales": "₹0", "total_commission": "₹0", "qualified": 0},
            "table": {"kind": "placeholder", "message": "No employee data available."},
            "chart": null}"#;
        let parsed: DashboardView = serde_json::from_str(json).unwrap();
        assert!(parsed.chart.is_none());
        assert!(matches!(parsed.table, TableView::Placeholder { .. }));
    }

    #[test]
    fn test_stale_view_is_ignored() {
        assert!(is_newer(None, &view(0)));
        assert!(is_newer(Some(&view(2)), &view(3)));
        assert!(is_newer(Some(&view(2)), &view(2)));
        assert!(!is_newer(Some(&view(4)), &view(3)));
    }

    #[test]
    fn test_restarted_server_view_replaces_current() {
        // Tab shows revision 3; the server restarts and its first add is revision 1
        let shown = view_in("run-a", 3);
        assert!(is_newer(Some(&shown), &view_in("run-b", 1)));
        assert!(is_newer(Some(&shown), &view_in("run-b", 0)));
    }

    #[test]
    fn test_pushed_revision_must_move_forward() {
        assert!(is_ahead(None, "run-a", 0, false));
        assert!(is_ahead(Some(("run-a", 3)), "run-a", 4, false));
        assert!(!is_ahead(Some(("run-a", 3)), "run-a", 3, false));
        assert!(is_ahead(Some(("run-a", 3)), "run-b", 1, false));
    }
}

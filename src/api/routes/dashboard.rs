//! Dashboard Routes
//!
//! Read-only views derived from the roster.
//!
//! - GET /api/v1/stats - Summary statistics
//! - GET /api/v1/ranking - Ranked view with labels
//! - GET /api/v1/dashboard - Summary, table and chart view models

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::presentation::DashboardView;
use crate::roster::{RankedEntry, RosterStats};

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<RosterStats> {
    Json(state.roster.stats().await)
}

/// GET /api/v1/ranking
///
/// Records ordered by sales, highest first. Ties keep insertion order.
pub async fn get_ranking(State(state): State<Arc<AppState>>) -> Json<Vec<RankedEntry>> {
    Json(state.roster.ranked().await)
}

/// GET /api/v1/dashboard
///
/// Everything a front end needs to redraw, formatted with the server's
/// currency settings.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let snapshot = state.roster.snapshot().await;
    Json(DashboardView::build(&snapshot, &state.currency))
}

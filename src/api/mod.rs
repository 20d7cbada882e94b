//! Tally REST API
//!
//! HTTP API layer for Tally, built with Axum.
//!
//! # Endpoints
//!
//! ## Employees
//! - `GET /api/v1/employees` - List records in insertion order
//! - `POST /api/v1/employees` - Add one employee
//! - `POST /api/v1/employees/batch` - Add many employees
//! - `DELETE /api/v1/employees?confirm=true` - Clear the roster
//!
//! ## Dashboard
//! - `GET /api/v1/stats` - Summary statistics
//! - `GET /api/v1/ranking` - Ranked view with labels
//! - `GET /api/v1/dashboard` - Summary, table and chart view models
//!
//! ## Export
//! - `GET /api/v1/export?format=csv|json` - Download the ranked view
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Roster change feed
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::api::{serve, ApiConfig, AppState};
//! use tally::presentation::CurrencyFormat;
//! use tally::roster::{CommissionPolicy, Roster};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let roster = Roster::seeded(CommissionPolicy::default());
//!
//!     let state = AppState::new(roster, config.clone(), CurrencyFormat::default());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Employee routes
        .route(
            "/employees",
            get(routes::employees::list_employees)
                .post(routes::employees::add_employee)
                .delete(routes::employees::clear_employees),
        )
        .route("/employees/batch", post(routes::employees::add_batch))
        // Dashboard routes
        .route("/stats", get(routes::dashboard::get_stats))
        .route("/ranking", get(routes::dashboard::get_ranking))
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        // Export routes
        .route("/export", get(routes::export::export_ranking))
        // WebSocket route
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the browser dashboard; no configured origins means any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(allowed))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Tally API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Tally API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

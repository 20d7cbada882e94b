//! # Tally
//!
//! Sales Commission Dashboard - an in-memory roster of employees and their
//! sales, a threshold commission rule, summary statistics and a ranked
//! performance view, served to terminal, CLI and browser front ends.
//!
//! ## Features
//!
//! - **Commission rule**: `sales * rate` above a threshold, zero otherwise
//! - **Ranked view**: Stable sort by sales with podium labels
//! - **Dashboard views**: Summary counters, table rows, dual-axis chart
//! - **Real-time**: WebSocket change feed for live dashboards
//! - **Import/export**: CSV in, CSV or JSON out
//!
//! ## Modules
//!
//! - [`roster`]: Records, commission policy, statistics and ranking
//! - [`presentation`]: View models and rendering adapters
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Roster change feed
//! - [`integrations`]: CSV import and ranked view export
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use tally::presentation::{CurrencyFormat, DashboardView};
//! use tally::roster::{CommissionPolicy, Roster};
//!
//! let mut roster = Roster::seeded(CommissionPolicy::default());
//! let snapshot = roster.add_employee("Kavya", 52_000.0);
//!
//! let view = DashboardView::build(&snapshot, &CurrencyFormat::default());
//! assert_eq!(view.summary.total_employees, 3);
//! assert_eq!(view.summary.total_commission, "₹11,200");
//! ```

pub mod api;
pub mod config;
pub mod integrations;
pub mod presentation;
pub mod roster;
pub mod websocket;

// Re-export top-level types for convenience
pub use roster::{
    commission_rule, CommissionPolicy, EmployeeInput, EmployeeRecord, PerformanceLabel,
    RankedEntry, Roster, RosterError, RosterResult, RosterSnapshot, RosterStats, RosterStore,
};

pub use presentation::{
    BarChart, ChartHandle, ChartSlot, CurrencyFormat, DashboardView, Grouping, SummaryView,
    TableView,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{
    websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage, WsEvent,
};

pub use config::{Config, ConfigError, LoggingConfig, RosterConfig};

pub use integrations::{CsvImporter, ExportFormat, ImportError};

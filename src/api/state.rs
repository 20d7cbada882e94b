//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use crate::presentation::CurrencyFormat;
use crate::roster::{Roster, RosterSnapshot, RosterStore};
use crate::websocket::{ConnectionHub, HubConfig, WsEvent};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The one roster this server manages
    pub roster: Arc<RosterStore>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Currency formatting for dashboard views and exports
    pub currency: Arc<CurrencyFormat>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for the change feed
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    /// Create a new AppState with the default hub configuration
    pub fn new(roster: Roster, config: ApiConfig, currency: CurrencyFormat) -> Self {
        Self::with_ws_config(roster, config, currency, HubConfig::default())
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_ws_config(
        roster: Roster,
        config: ApiConfig,
        currency: CurrencyFormat,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            roster: Arc::new(RosterStore::new(roster)),
            config: Arc::new(config),
            currency: Arc::new(currency),
            start_time: Instant::now(),
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
        }
    }

    /// Tell every dashboard subscribed to `roster` about a mutation
    pub fn notify_roster_changed(&self, snapshot: &RosterSnapshot) {
        self.ws_hub.publish(WsEvent::roster_updated(snapshot));
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum employees accepted in one batch request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Enable the export endpoint
    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_max_batch_size() -> usize {
    1_000
}

fn default_enable_export() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_batch_size: default_max_batch_size(),
            enable_export: default_enable_export(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::CommissionPolicy;

    #[test]
    fn test_addr() {
        assert_eq!(ApiConfig::new("127.0.0.1", 9000).addr(), "127.0.0.1:9000");
    }

    #[tokio::test]
    async fn test_state_wraps_roster() {
        let state = AppState::new(
            Roster::seeded(CommissionPolicy::default()),
            ApiConfig::default(),
            CurrencyFormat::default(),
        );
        assert_eq!(state.roster.len().await, 2);
        assert_eq!(state.ws_connection_count().await, 0);
    }
}

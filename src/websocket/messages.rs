//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! clients (dashboards) and the Tally server.

use serde::{Deserialize, Serialize};

use crate::roster::{RankedEntry, RosterSnapshot, RosterStats};

/// Topic carrying roster changes
pub const ROSTER_TOPIC: &str = "roster";

/// Topic carrying server notices
pub const SYSTEM_TOPIC: &str = "system";

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for real-time updates
    Subscribe {
        /// List of topics to subscribe to ("roster", "system")
        topics: Vec<String>,
    },
    /// Unsubscribe from topics
    Unsubscribe {
        /// List of topics to unsubscribe from
        topics: Vec<String>,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The roster changed; carries everything needed to redraw
    RosterUpdated {
        /// Roster the revision belongs to; changes when the server restarts
        epoch: String,
        /// Roster revision after the change
        revision: u64,
        stats: RosterStats,
        /// Ranked view, highest sales first
        ranked: Vec<RankedEntry>,
    },
    /// Server notice
    System {
        message: String,
    },
    /// Subscription confirmed
    Subscribed {
        /// Topics successfully subscribed to
        topics: Vec<String>,
    },
    /// Unsubscription confirmed
    Unsubscribed {
        /// Topics successfully unsubscribed from
        topics: Vec<String>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
}

impl From<&RosterSnapshot> for ServerMessage {
    fn from(snapshot: &RosterSnapshot) -> Self {
        ServerMessage::RosterUpdated {
            epoch: snapshot.epoch.clone(),
            revision: snapshot.revision,
            stats: snapshot.stats,
            ranked: snapshot.ranked.clone(),
        }
    }
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to
    pub topic: String,
    /// The message to send to subscribers
    pub message: ServerMessage,
}

impl WsEvent {
    /// Create a roster event from a post-mutation snapshot
    pub fn roster_updated(snapshot: &RosterSnapshot) -> Self {
        Self {
            topic: ROSTER_TOPIC.to_string(),
            message: ServerMessage::from(snapshot),
        }
    }

    /// Create a system event
    pub fn system(message: &str) -> Self {
        Self {
            topic: SYSTEM_TOPIC.to_string(),
            message: ServerMessage::System {
                message: message.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CommissionPolicy, Roster};

    #[test]
    fn test_client_message_deserialize_subscribe() {
        let json = r#"{"type": "subscribe", "topics": ["roster", "system"]}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Subscribe { topics } => {
                assert_eq!(topics, vec!["roster", "system"]);
            }
            _ => panic!("Expected Subscribe"),
        }
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_server_message_serialize_roster_updated() {
        let roster = Roster::seeded(CommissionPolicy::default());
        let event = WsEvent::roster_updated(&roster.snapshot());
        assert_eq!(event.topic, "roster");

        let json: serde_json::Value = serde_json::to_value(&event.message).unwrap();
        assert_eq!(json["type"], "roster_updated");
        assert_eq!(json["epoch"], roster.epoch());
        assert_eq!(json["revision"], 0);
        assert_eq!(json["stats"]["total_commission"], 6000.0);
        assert_eq!(json["ranked"][0]["name"], "Arun");
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            connection_id: "abc-123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"connection_id\":\"abc-123\""));
    }

    #[test]
    fn test_ws_event_system() {
        let event = WsEvent::system("shutting down");
        assert_eq!(event.topic, "system");
        assert_eq!(
            event.message,
            ServerMessage::System {
                message: "shutting down".to_string()
            }
        );
    }
}

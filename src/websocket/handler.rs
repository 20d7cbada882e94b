//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::ConnectionHub;
use super::messages::{ClientMessage, ServerMessage, ROSTER_TOPIC};
use crate::api::AppState;
use crate::roster::RosterStore;

/// WebSocket upgrade handler
///
/// This is the entry point for WebSocket connections.
/// It upgrades the HTTP connection to WebSocket and starts message handling.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.ws_hub);
    let roster = Arc::clone(&state.roster);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, roster))
}

fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(text) => Some(Message::Text(text)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            None
        }
    }
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, hub: Arc<ConnectionHub>, roster: Arc<RosterStore>) {
    let (mut sender, mut receiver) = socket.split();

    // Create channel for sending messages to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected WebSocket connection");
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            if let Some(msg) = encode(&error_msg) {
                let _ = sender.send(msg).await;
            }
            return;
        }
    };

    let connected_msg = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    let sent = match encode(&connected_msg) {
        Some(msg) => sender.send(msg).await.is_ok(),
        None => false,
    };
    if !sent {
        tracing::error!(connection_id = %connection_id, "Failed to send connected message");
        hub.unregister(&connection_id).await;
        return;
    }

    let conn_id_for_send = connection_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Some(frame) = encode(&msg) else {
                continue;
            };
            if sender.send(frame).await.is_err() {
                tracing::debug!(
                    connection_id = %conn_id_for_send,
                    "WebSocket send failed, closing connection"
                );
                break;
            }
        }
    });

    let hub_for_recv = Arc::clone(&hub);
    let conn_id_for_recv = connection_id.clone();

    // Task to receive messages from WebSocket and handle them
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&hub_for_recv, &roster, &conn_id_for_recv, msg).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unregister(&connection_id).await;
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(
    hub: &ConnectionHub,
    roster: &RosterStore,
    connection_id: &str,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    handle_client_message(hub, roster, connection_id, client_msg).await;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    // Keep the connection open
                    let error_msg = ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = hub.send_to(connection_id, error_msg).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let error_msg = ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            };
            let _ = hub.send_to(connection_id, error_msg).await;
            true
        }
        // Axum answers protocol pings itself
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            false
        }
    }
}

/// Handle a parsed client message
async fn handle_client_message(
    hub: &ConnectionHub,
    roster: &RosterStore,
    connection_id: &str,
    message: ClientMessage,
) {
    match message {
        ClientMessage::Subscribe { topics } => match hub.subscribe(connection_id, topics).await {
            Ok(subscribed) => {
                let wants_roster = subscribed.iter().any(|t| t == ROSTER_TOPIC);
                let response = ServerMessage::Subscribed { topics: subscribed };
                let _ = hub.send_to(connection_id, response).await;

                // New roster subscribers get the current state straight away
                if wants_roster {
                    let snapshot = roster.snapshot().await;
                    let _ = hub
                        .send_to(connection_id, ServerMessage::from(&snapshot))
                        .await;
                }
            }
            Err(e) => send_error(hub, connection_id, "Subscribe error", e.to_string()).await,
        },
        ClientMessage::Unsubscribe { topics } => {
            match hub.unsubscribe(connection_id, topics).await {
                Ok(unsubscribed) => {
                    let response = ServerMessage::Unsubscribed {
                        topics: unsubscribed,
                    };
                    let _ = hub.send_to(connection_id, response).await;
                }
                Err(e) => send_error(hub, connection_id, "Unsubscribe error", e.to_string()).await,
            }
        }
        ClientMessage::Ping => {
            let _ = hub.send_to(connection_id, ServerMessage::Pong).await;
        }
    }
}

async fn send_error(hub: &ConnectionHub, connection_id: &str, context: &str, message: String) {
    tracing::error!(connection_id = %connection_id, error = %message, "{}", context);
    let _ = hub
        .send_to(connection_id, ServerMessage::Error { message })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CommissionPolicy, Roster};
    use crate::websocket::HubConfig;

    #[tokio::test]
    async fn test_subscribe_sends_current_roster() {
        let hub = ConnectionHub::new(HubConfig::default());
        let roster = RosterStore::new(Roster::seeded(CommissionPolicy::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        let subscribe = Message::Text(r#"{"type":"subscribe","topics":["roster"]}"#.to_string());
        assert!(handle_ws_message(&hub, &roster, &id, subscribe).await);

        assert_eq!(
            rx.try_recv().unwrap(),
            ServerMessage::Subscribed {
                topics: vec!["roster".to_string()]
            }
        );
        match rx.try_recv().unwrap() {
            ServerMessage::RosterUpdated { stats, .. } => assert_eq!(stats.total_employees, 2),
            other => panic!("Expected RosterUpdated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_message_keeps_connection() {
        let hub = ConnectionHub::new(HubConfig::default());
        let roster = RosterStore::new(Roster::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        let garbage = Message::Text("{not json".to_string());
        assert!(handle_ws_message(&hub, &roster, &id, garbage).await);
        assert!(matches!(rx.try_recv(), Ok(ServerMessage::Error { .. })));

        let ping = Message::Text(r#"{"type":"ping"}"#.to_string());
        assert!(handle_ws_message(&hub, &roster, &id, ping).await);
        assert_eq!(rx.try_recv().unwrap(), ServerMessage::Pong);

        assert!(!handle_ws_message(&hub, &roster, &id, Message::Close(None)).await);
    }
}

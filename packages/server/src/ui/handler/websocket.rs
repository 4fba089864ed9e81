//! WebSocket connection handlers.
//!
//! One task pair per connection: a receive loop that parses inbound
//! location reports and triggers the group broadcast, and a push loop that
//! forwards broadcast payloads from the connection's channel to the socket.
//! Whichever task finishes first aborts the other, and the cleanup below
//! the `select!` runs exactly once on every exit path (peer close,
//! transport fault, or reaper-initiated close).

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, GroupId, Location},
    infrastructure::dto::websocket::{LocationEntryDto, LocationUpdateDto},
    ui::state::AppState,
};

use serde::Deserialize;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    #[serde(rename = "groupId")]
    pub group_id: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let group_id_str = query.group_id;

    // Convert String -> GroupId (Domain Model)
    let group_id = match GroupId::try_from(group_id_str.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid group id: '{}'", group_id_str);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // The connection id is generated server-side and used only as a map key
    let connection_id = ConnectionId::generate();

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Use JoinGroupUseCase to register the connection
    // (the group is created implicitly on first join)
    state
        .join_group_usecase
        .execute(group_id.clone(), connection_id.clone(), tx)
        .await;

    tracing::info!(
        "Connection '{}' joined group '{}'",
        connection_id,
        group_id
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, group_id, connection_id, rx)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: group snapshots (via
/// the rx channel) are sent to this client's WebSocket connection.
///
/// The loop ends when the channel is closed — either because the session
/// is shutting down, or because the idle reaper dropped this connection's
/// sender to force-close it. In both cases a close frame is attempted
/// best-effort before the task finishes.
///
/// # Arguments
///
/// * `rx` - Channel receiver for group snapshot payloads
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        // Best-effort graceful close; the transport may already be gone
        let _ = sender.close().await;
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    group_id: GroupId,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive location reports from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text);

                    // Parse the incoming message; a malformed payload is
                    // discarded and the connection stays open
                    let dto = match serde_json::from_str::<LocationUpdateDto>(&text) {
                        Ok(dto) => dto,
                        Err(e) => {
                            tracing::warn!("Failed to parse message as JSON: {}", e);
                            continue;
                        }
                    };

                    // DTO から Domain Model への変換（検証付き）
                    let location = match Location::try_from(dto) {
                        Ok(location) => location,
                        Err(e) => {
                            tracing::warn!("Rejected location update: {}", e);
                            continue;
                        }
                    };

                    // Use UpdateLocationUseCase to store the location and
                    // build the group snapshot
                    match state_clone
                        .update_location_usecase
                        .execute(&connection_id_clone, location)
                        .await
                    {
                        Ok(snapshot) => {
                            // Domain Model から DTO への変換
                            let entries: Vec<LocationEntryDto> =
                                snapshot.entries.iter().map(LocationEntryDto::from).collect();
                            let snapshot_json = serde_json::to_string(&entries).unwrap();

                            if let Err(e) = state_clone
                                .update_location_usecase
                                .broadcast(snapshot.targets, &snapshot_json)
                                .await
                            {
                                tracing::warn!("Failed to broadcast snapshot: {}", e);
                            }
                        }
                        Err(e) => {
                            // The session is already gone (reaper won the
                            // race); this loop is about to end anyway
                            tracing::debug!("Dropped location update: {}", e);
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push group snapshots to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Use LeaveGroupUseCase for the canonical cleanup. This runs exactly
    // once per connection, whichever exit path was taken.
    state
        .leave_group_usecase
        .execute(&group_id, &connection_id)
        .await;

    tracing::info!(
        "Connection '{}' left group '{}' and was cleaned up",
        connection_id,
        group_id
    );
}

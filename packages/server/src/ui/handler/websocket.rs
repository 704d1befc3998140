//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, IncomingMessage, Notification},
    infrastructure::dto::websocket::ClientEvent,
    ui::{connection_tracker::ConnectionGuard, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Extension(guard): Extension<ConnectionGuard>,
) -> impl IntoResponse {
    let max_message_size = state.max_message_size;
    ws.max_message_size(max_message_size)
        .max_frame_size(max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, state, guard))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: broadcasts and direct pushes
/// (via rx channel) are sent to this client's WebSocket connection.
///
/// # Arguments
///
/// * `rx` - Channel receiver for encoded frames addressed to this client
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Tell one connection that its last frame was rejected.
async fn reject(state: &AppState, connection: &ConnectionId, reason: String) {
    let notification = Notification::Rejected { reason };
    if let Err(e) = state.message_pusher.push_to(connection, &notification).await {
        tracing::warn!("Failed to send rejection to '{}': {}", connection, e);
    }
}

/// Dispatch one text frame received from `connection`.
///
/// A malformed frame only affects its sender: it is answered with an `error`
/// event and the connection stays open.
async fn handle_frame(state: &AppState, connection: &ConnectionId, frame: &str) {
    tracing::debug!("Received {} bytes from '{}'", frame.len(), connection);

    let event = match serde_json::from_str::<ClientEvent>(frame) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Failed to parse frame from '{}': {}", connection, e);
            reject(state, connection, format!("Malformed frame: {}", e)).await;
            return;
        }
    };

    match event {
        ClientEvent::Register(name) => {
            state
                .register_name_usecase
                .execute(connection.clone(), &name)
                .await;
        }
        ClientEvent::Message(payload) => {
            // Convert DTO -> Domain Model
            let incoming = match IncomingMessage::try_from(payload) {
                Ok(incoming) => incoming,
                Err(e) => {
                    tracing::warn!("Invalid message from '{}': {}", connection, e);
                    reject(state, connection, e.to_string()).await;
                    return;
                }
            };

            if let Err(e) = state
                .relay_message_usecase
                .execute(connection.clone(), incoming)
                .await
            {
                tracing::warn!("Failed to relay message from '{}': {}", connection, e);
                reject(state, connection, e.to_string()).await;
            }
        }
    }
}

/// Wait until either task ends, then abort the other and wait for it to stop.
///
/// An aborted task only stops at its next yield point, so it is awaited before
/// returning: nothing it does can land after the caller's cleanup.
async fn join_connection_tasks(mut recv_task: JoinHandle<()>, mut send_task: JoinHandle<()>) {
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, _guard: ConnectionGuard) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectClientUseCase to attach the channel and greet the client
    let connection = state.connect_client_usecase.execute(tx).await;
    tracing::info!("Client '{}' connected", connection);

    // Spawn a task to push broadcasts and direct messages to this client
    let send_task = pusher_loop(rx, sender);

    let connection_clone = connection.clone();
    let state_clone = state.clone();

    // Spawn a task to receive messages from this client
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_frame(&state_clone, &connection_clone, text.as_str()).await;
                }
                Message::Binary(_) => {
                    reject(
                        &state_clone,
                        &connection_clone,
                        "Binary frames are not supported".to_string(),
                    )
                    .await;
                }
                Message::Ping(_) => {
                    tracing::trace!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    join_connection_tasks(recv_task, send_task).await;

    // Use DisconnectClientUseCase to remove the entry and publish presence
    state
        .disconnect_client_usecase
        .execute(&connection)
        .await;
}

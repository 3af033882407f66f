use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

/// Inbound mirror messages. Mirrors are read-only; the only message they may
/// send is a snapshot re-request.
#[derive(Debug, Deserialize)]
struct MirrorMessage {
    message_type: String,
}

pub async fn handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.clone(), code))
}

pub async fn handle_socket(ws: WebSocket, state: AppState, code: String) {
    let connection_id = Uuid::new_v4();
    info!("mirror {} connected to room {}", connection_id, code);

    let tx = state.get_or_create_room_channel(&code).await;
    let (mut sender, mut receiver) = ws.split();
    let mut rx = tx.subscribe();

    // Late joiner: push the current snapshot before relaying updates.
    if let Some(snapshot) = state.snapshot_message(&code).await {
        if sender.send(snapshot).await.is_err() {
            return;
        }
    }

    let receive_state = state.clone();
    let receive_code = code.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Text(text) = msg {
                match serde_json::from_str::<MirrorMessage>(&text) {
                    Ok(m) if m.message_type == "sync_request" => {
                        receive_state.broadcast_snapshot(&receive_code).await;
                    }
                    _ => {
                        log::debug!(
                            "ignoring message from read-only mirror in room {}: {}",
                            receive_code,
                            text
                        );
                    }
                }
            }
        }
    });

    let send_code = code.clone();
    let send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            if let Err(e) = sender.send(msg).await {
                log::debug!("mirror in room {} went away: {}", send_code, e);
                break;
            }
        }
    });

    let _ = tokio::join!(receive_task, send_task);
    info!("mirror {} disconnected from room {}", connection_id, code);
}

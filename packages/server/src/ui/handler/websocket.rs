//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{RoomId, SessionId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Transport-assigned identity: one fresh id per accepted connection.
    let session_id = SessionId::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, session_id))
}

/// Spawns a task that receives frames from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This is the outbound half of a connection: everything other sessions
/// broadcast into the room lands on the rx channel and flows out here.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session_id: SessionId) {
    let (mut sender, mut receiver) = socket.split();

    // Register the session's outbound channel with the broadcast hub
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .connect_session_usecase
        .execute(session_id.clone(), tx)
        .await;

    // Handshake: tell the client which session id the transport assigned.
    // The client needs it to mark its own chat messages.
    let hello = ServerEvent::Connected {
        session_id: session_id.as_str().to_string(),
    };
    let hello_json = serde_json::to_string(&hello).unwrap();
    if let Err(e) = sender.send(Message::Text(hello_json.into())).await {
        tracing::error!("Failed to send handshake to '{}': {}", session_id, e);
        state.disconnect_session_usecase.execute(&session_id).await;
        return;
    }
    tracing::info!("Session '{}' connected", session_id);

    let session_id_clone = session_id.clone();
    let state_clone = state.clone();

    // Inbound half: parse protocol events and dispatch to the usecases
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
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => dispatch_event(&state_clone, &session_id_clone, event).await,
                    Err(e) => {
                        // Malformed frames are dropped; nothing is sent back
                        tracing::warn!("Failed to parse frame as protocol event: {}", e);
                    }
                },
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Unconditional teardown; a reconnecting client rejoins from scratch
    match state.disconnect_session_usecase.execute(&session_id).await {
        Some(room_id) => tracing::info!(
            "Session '{}' disconnected, left room '{}'",
            session_id,
            room_id
        ),
        None => tracing::info!("Session '{}' disconnected", session_id),
    }
}

/// Parse a raw room id, logging and discarding events that carry an
/// invalid one.
fn parse_room_id(raw: String) -> Option<RoomId> {
    match RoomId::try_from(raw) {
        Ok(room_id) => Some(room_id),
        Err(e) => {
            tracing::warn!("Dropping event with invalid room id: {}", e);
            None
        }
    }
}

async fn dispatch_event(state: &Arc<AppState>, session_id: &SessionId, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom { room_id } => {
            let Some(room_id) = parse_room_id(room_id) else {
                return;
            };

            let snapshot = state.join_room_usecase.execute(session_id, &room_id).await;
            tracing::info!("Session '{}' joined room '{}'", session_id, room_id);

            // Reply-only: the full snapshot goes to the joiner alone
            let sync = ServerEvent::SyncState {
                code: snapshot.code,
                language: snapshot.language,
            };
            let sync_json = serde_json::to_string(&sync).unwrap();
            if let Err(e) = state
                .join_room_usecase
                .push_snapshot(session_id, &sync_json)
                .await
            {
                tracing::warn!("Failed to deliver snapshot to '{}': {}", session_id, e);
            }

            // Presence notice for everyone already in the room
            let presence = ServerEvent::UserJoined {
                session_id: session_id.as_str().to_string(),
            };
            let presence_json = serde_json::to_string(&presence).unwrap();
            state
                .join_room_usecase
                .notify_presence(session_id, &room_id, &presence_json)
                .await;
        }

        ClientEvent::CodeChange { room_id, code } => {
            let Some(room_id) = parse_room_id(room_id) else {
                return;
            };

            let payload = serde_json::to_string(&ServerEvent::CodeChange { code: code.clone() })
                .unwrap();
            match state
                .change_code_usecase
                .execute(session_id, &room_id, code, payload)
                .await
            {
                Ok(targets) => tracing::debug!(
                    "Mirrored edit in room '{}' to {} session(s)",
                    room_id,
                    targets.len()
                ),
                Err(stale) => tracing::debug!("{}", stale),
            }
        }

        ClientEvent::LanguageChange {
            room_id,
            language,
            template,
        } => {
            let Some(room_id) = parse_room_id(room_id) else {
                return;
            };

            let template_payload = template.as_ref().map(|t| {
                serde_json::to_string(&ServerEvent::CodeChange { code: t.clone() }).unwrap()
            });
            let language_payload =
                serde_json::to_string(&ServerEvent::LanguageChange { language }).unwrap();
            match state
                .change_language_usecase
                .execute(
                    &room_id,
                    language,
                    template,
                    template_payload,
                    language_payload,
                )
                .await
            {
                Ok(targets) => tracing::info!(
                    "Room '{}' switched to {} ({} session(s))",
                    room_id,
                    language,
                    targets.len()
                ),
                Err(stale) => tracing::debug!("{}", stale),
            }
        }

        ClientEvent::ChatMessage {
            room_id,
            message,
            sender,
            sender_name,
        } => {
            let Some(room_id) = parse_room_id(room_id) else {
                return;
            };

            let chat = state.send_chat_usecase.stamp(message, sender, sender_name);
            let payload = serde_json::to_string(&ServerEvent::ChatMessage {
                message: chat.text,
                sender: chat.sender,
                sender_name: chat.sender_name,
                timestamp: chat.timestamp,
            })
            .unwrap();
            let targets = state.send_chat_usecase.execute(&room_id, &payload).await;
            tracing::debug!(
                "Relayed chat in room '{}' to {} session(s)",
                room_id,
                targets.len()
            );
        }
    }
}

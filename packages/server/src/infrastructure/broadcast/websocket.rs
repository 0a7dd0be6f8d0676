//! WebSocket-backed broadcast hub.
//!
//! The transport layer (`ui/handler/websocket.rs`) creates one unbounded
//! channel per connection and drains its receiver into the socket sink;
//! this hub keeps the sender ends together with the room membership maps
//! and implements delivery on top of them. Creating sockets and sending
//! frames stay separate concerns.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{BroadcastError, RoomBroadcaster, RoomId, SessionChannel, SessionId};

#[derive(Default)]
struct HubState {
    /// Outbound channel per connected session
    channels: HashMap<SessionId, SessionChannel>,
    /// Member set per room
    members: HashMap<RoomId, HashSet<SessionId>>,
    /// Which room each session has joined (at most one)
    joined: HashMap<SessionId, RoomId>,
}

impl HubState {
    fn leave(&mut self, session_id: &SessionId, room_id: &RoomId) {
        if let Some(set) = self.members.get_mut(room_id) {
            set.remove(session_id);
        }
        if self.joined.get(session_id) == Some(room_id) {
            self.joined.remove(session_id);
        }
    }
}

/// Session registry and broadcast hub over per-session mpsc senders.
pub struct WebSocketBroadcaster {
    state: Mutex<HubState>,
}

impl WebSocketBroadcaster {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HubState::default()),
        }
    }
}

impl Default for WebSocketBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomBroadcaster for WebSocketBroadcaster {
    async fn register_session(&self, session_id: SessionId, sender: SessionChannel) {
        let mut state = self.state.lock().await;
        state.channels.insert(session_id.clone(), sender);
        tracing::debug!("Session '{}' registered to broadcast hub", session_id);
    }

    async fn unregister_session(&self, session_id: &SessionId) -> Option<RoomId> {
        let mut state = self.state.lock().await;
        state.channels.remove(session_id);
        let joined = state.joined.remove(session_id);
        if let Some(room_id) = &joined {
            if let Some(set) = state.members.get_mut(room_id) {
                set.remove(session_id);
            }
        }
        tracing::debug!("Session '{}' unregistered from broadcast hub", session_id);
        joined
    }

    async fn join(&self, session_id: &SessionId, room_id: &RoomId) {
        let mut state = self.state.lock().await;

        // A rejoin is transactional: membership in the previous room ends
        // before membership in the new one starts.
        if let Some(previous) = state.joined.get(session_id).cloned() {
            if &previous != room_id {
                state.leave(session_id, &previous);
                tracing::debug!(
                    "Session '{}' left room '{}' before joining '{}'",
                    session_id,
                    previous,
                    room_id
                );
            }
        }

        state
            .members
            .entry(room_id.clone())
            .or_default()
            .insert(session_id.clone());
        state.joined.insert(session_id.clone(), room_id.clone());
    }

    async fn leave(&self, session_id: &SessionId, room_id: &RoomId) {
        let mut state = self.state.lock().await;
        state.leave(session_id, room_id);
    }

    async fn joined_room(&self, session_id: &SessionId) -> Option<RoomId> {
        let state = self.state.lock().await;
        state.joined.get(session_id).cloned()
    }

    async fn push_to(&self, session_id: &SessionId, content: &str) -> Result<(), BroadcastError> {
        let state = self.state.lock().await;

        let sender = state
            .channels
            .get(session_id)
            .ok_or_else(|| BroadcastError::SessionNotFound(session_id.as_str().to_string()))?;

        sender
            .send(content.to_string())
            .map_err(|e| BroadcastError::PushFailed(session_id.as_str().to_string(), e.to_string()))
    }

    async fn broadcast(
        &self,
        room_id: &RoomId,
        content: &str,
        exclude: Option<&SessionId>,
    ) -> Vec<SessionId> {
        let state = self.state.lock().await;

        let Some(members) = state.members.get(room_id) else {
            return Vec::new();
        };

        let mut targeted = Vec::new();
        for session_id in members {
            if exclude == Some(session_id) {
                continue;
            }
            match state.channels.get(session_id) {
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push frame to session '{}': {}", session_id, e);
                    }
                    targeted.push(session_id.clone());
                }
                None => {
                    tracing::warn!(
                        "Session '{}' is a member of room '{}' but has no channel, skipping",
                        session_id,
                        room_id
                    );
                }
            }
        }

        targeted
    }
}

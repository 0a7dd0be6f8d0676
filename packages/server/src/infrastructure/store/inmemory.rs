//! In-memory room store.
//!
//! Implements the domain's [`RoomStore`] trait over a `HashMap` behind an
//! async mutex. The map is owned by this object and injected where needed;
//! there is no process-global state.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Language, RoomId, RoomState, RoomStore};

/// In-memory implementation of [`RoomStore`].
///
/// Rooms are never evicted; for the intended short-lived pair-coding
/// sessions the map stays small. A long-running deployment would need an
/// eviction policy before this becomes a problem.
pub struct InMemoryRoomStore {
    rooms: Mutex<HashMap<RoomId, RoomState>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Number of rooms ever created (for logging).
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

impl Default for InMemoryRoomStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn get_or_create(&self, room_id: &RoomId) -> RoomState {
        let mut rooms = self.rooms.lock().await;
        rooms.entry(room_id.clone()).or_default().clone()
    }

    async fn set_code(&self, room_id: &RoomId, code: String) -> bool {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(room_id) {
            Some(state) => {
                state.code = code;
                true
            }
            None => false,
        }
    }

    async fn set_language(
        &self,
        room_id: &RoomId,
        language: Language,
        template: Option<String>,
    ) -> bool {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(room_id) {
            Some(state) => {
                state.language = language;
                if let Some(template) = template {
                    state.code = template;
                }
                true
            }
            None => false,
        }
    }

    async fn snapshot(&self, room_id: &RoomId) -> Option<RoomState> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }
}

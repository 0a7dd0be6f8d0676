//! UseCase: code buffer overwrite.

use std::sync::Arc;

use crate::domain::{RoomBroadcaster, RoomId, RoomStore, SessionId};

use super::error::StaleEvent;

/// Handles a code-change event: overwrite the stored buffer, then mirror
/// the new contents to every other member of the room.
///
/// The sender is excluded on purpose: it already holds the authoritative
/// local value, and echoing it back would make the editor flicker. Last
/// write wins; there is no version or sequence check on concurrent edits.
pub struct ChangeCodeUseCase {
    store: Arc<dyn RoomStore>,
    hub: Arc<dyn RoomBroadcaster>,
}

impl ChangeCodeUseCase {
    pub fn new(store: Arc<dyn RoomStore>, hub: Arc<dyn RoomBroadcaster>) -> Self {
        Self { store, hub }
    }

    /// Apply the overwrite and broadcast `payload` (the serialized
    /// code-change event) to the room, excluding the sender.
    ///
    /// Returns the sessions the broadcast targeted, or [`StaleEvent`] when
    /// the room has never been joined.
    pub async fn execute(
        &self,
        sender_id: &SessionId,
        room_id: &RoomId,
        code: String,
        payload: String,
    ) -> Result<Vec<SessionId>, StaleEvent> {
        if !self.store.set_code(room_id, code).await {
            return Err(StaleEvent(room_id.as_str().to_string()));
        }

        Ok(self.hub.broadcast(room_id, &payload, Some(sender_id)).await)
    }
}

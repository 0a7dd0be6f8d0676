//! UseCase: session disconnect.

use std::sync::Arc;

use crate::domain::{RoomBroadcaster, RoomId, SessionId};

/// Tears down a session after its transport connection ends.
///
/// The session's channel and room membership are dropped; nothing is
/// broadcast (group membership removal is all the other members observe).
/// A reconnecting client starts from scratch with a fresh session id and a
/// fresh snapshot on its next join.
pub struct DisconnectSessionUseCase {
    hub: Arc<dyn RoomBroadcaster>,
}

impl DisconnectSessionUseCase {
    pub fn new(hub: Arc<dyn RoomBroadcaster>) -> Self {
        Self { hub }
    }

    /// Returns the room the session was a member of, for logging.
    pub async fn execute(&self, session_id: &SessionId) -> Option<RoomId> {
        self.hub.unregister_session(session_id).await
    }
}

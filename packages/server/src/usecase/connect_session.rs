//! UseCase: session connect.

use std::sync::Arc;

use crate::domain::{RoomBroadcaster, SessionChannel, SessionId};

/// Registers a freshly accepted connection with the broadcast hub.
///
/// The session is not a member of any room yet; that happens when its
/// first join-room event arrives.
pub struct ConnectSessionUseCase {
    hub: Arc<dyn RoomBroadcaster>,
}

impl ConnectSessionUseCase {
    pub fn new(hub: Arc<dyn RoomBroadcaster>) -> Self {
        Self { hub }
    }

    pub async fn execute(&self, session_id: SessionId, sender: SessionChannel) {
        self.hub.register_session(session_id, sender).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::broadcast::WebSocketBroadcaster;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_channel_without_room_membership() {
        // given:
        let hub = Arc::new(WebSocketBroadcaster::new());
        let usecase = ConnectSessionUseCase::new(hub.clone());
        let session_id = SessionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when:
        usecase.execute(session_id.clone(), tx).await;

        // then: reachable for pushes, member of nothing
        hub.push_to(&session_id, "hello").await.unwrap();
        assert_eq!(rx.recv().await, Some("hello".to_string()));
        assert_eq!(hub.joined_room(&session_id).await, None);
    }
}

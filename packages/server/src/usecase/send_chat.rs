//! UseCase: chat relay.

use std::sync::Arc;

use coderoom_shared::time::Clock;

use crate::domain::{ChatMessage, RoomBroadcaster, RoomId, SessionId};

/// Handles a chat-message event.
///
/// A pure relay: no room state is read or written, and no existence check
/// is made (a room nobody has joined simply has an empty member set). The
/// broadcast includes the sender, whose client renders its own message
/// through the same path as everyone else and marks it by session-id
/// equality. `sender` and `sender_name` are relayed verbatim.
pub struct SendChatUseCase {
    hub: Arc<dyn RoomBroadcaster>,
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    pub fn new(hub: Arc<dyn RoomBroadcaster>, clock: Arc<dyn Clock>) -> Self {
        Self { hub, clock }
    }

    /// Build the in-flight message, stamping the server timestamp at
    /// broadcast time (not at send time).
    pub fn stamp(&self, text: String, sender: String, sender_name: String) -> ChatMessage {
        ChatMessage {
            text,
            sender,
            sender_name,
            timestamp: self.clock.now_unix_millis(),
        }
    }

    /// Broadcast the serialized message to the whole room, sender included.
    pub async fn execute(&self, room_id: &RoomId, payload: &str) -> Vec<SessionId> {
        self.hub.broadcast(room_id, payload, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::broadcast::WebSocketBroadcaster;
    use coderoom_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    async fn connect(
        hub: &Arc<WebSocketBroadcaster>,
    ) -> (SessionId, mpsc::UnboundedReceiver<String>) {
        let session_id = SessionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        hub.register_session(session_id.clone(), tx).await;
        (session_id, rx)
    }

    #[tokio::test]
    async fn test_stamp_uses_server_clock() {
        // given:
        let hub = Arc::new(WebSocketBroadcaster::new());
        let usecase = SendChatUseCase::new(hub, Arc::new(FixedClock::new(1672531200000)));

        // when:
        let message = usecase.stamp(
            "Hello World".to_string(),
            "session-1".to_string(),
            "Alice".to_string(),
        );

        // then: server-assigned timestamp, fields relayed verbatim
        assert_eq!(message.timestamp, 1672531200000);
        assert_eq!(message.text, "Hello World");
        assert_eq!(message.sender, "session-1");
        assert_eq!(message.sender_name, "Alice");
    }

    #[tokio::test]
    async fn test_relay_includes_sender() {
        // given:
        let hub = Arc::new(WebSocketBroadcaster::new());
        let usecase = SendChatUseCase::new(hub.clone(), Arc::new(FixedClock::new(0)));
        let (alice, mut rx_alice) = connect(&hub).await;
        let (bob, mut rx_bob) = connect(&hub).await;
        let r = room("r");
        hub.join(&alice, &r).await;
        hub.join(&bob, &r).await;

        // when:
        let targeted = usecase.execute(&r, "chat-payload").await;

        // then: exactly one copy each, sender included
        assert_eq!(targeted.len(), 2);
        assert_eq!(rx_alice.recv().await, Some("chat-payload".to_string()));
        assert!(rx_alice.try_recv().is_err());
        assert_eq!(rx_bob.recv().await, Some("chat-payload".to_string()));
        assert!(rx_bob.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_to_unjoined_room_reaches_nobody() {
        // given: the room id exists only in the sender's imagination
        let hub = Arc::new(WebSocketBroadcaster::new());
        let usecase = SendChatUseCase::new(hub.clone(), Arc::new(FixedClock::new(0)));
        let (_alice, mut rx_alice) = connect(&hub).await;

        // when:
        let targeted = usecase.execute(&room("ghost"), "chat-payload").await;

        // then: relayed into the void without error
        assert!(targeted.is_empty());
        assert!(rx_alice.try_recv().is_err());
    }
}

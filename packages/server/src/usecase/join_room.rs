//! UseCase: room join.

use std::sync::Arc;

use crate::domain::{BroadcastError, RoomBroadcaster, RoomId, RoomState, RoomStore, SessionId};

/// Handles a join-room event.
///
/// `execute` performs the state transition (lazy room creation plus
/// transactional membership switch) and hands back the snapshot; the
/// transport layer serializes it and delivers through `push_snapshot` /
/// `notify_presence`, mirroring the split between deciding and delivering
/// used by the other usecases.
pub struct JoinRoomUseCase {
    store: Arc<dyn RoomStore>,
    hub: Arc<dyn RoomBroadcaster>,
}

impl JoinRoomUseCase {
    pub fn new(store: Arc<dyn RoomStore>, hub: Arc<dyn RoomBroadcaster>) -> Self {
        Self { store, hub }
    }

    /// Create the room if needed, move the session's membership to it, and
    /// return the current snapshot.
    ///
    /// Joining a room the session is already a member of is harmless; the
    /// caller gets a fresh snapshot and membership is unchanged.
    pub async fn execute(&self, session_id: &SessionId, room_id: &RoomId) -> RoomState {
        let snapshot = self.store.get_or_create(room_id).await;
        self.hub.join(session_id, room_id).await;
        snapshot
    }

    /// Deliver the serialized snapshot to the joining session only.
    pub async fn push_snapshot(
        &self,
        session_id: &SessionId,
        payload: &str,
    ) -> Result<(), BroadcastError> {
        self.hub.push_to(session_id, payload).await
    }

    /// Announce the join to the room's other members (the joiner already
    /// knows it joined).
    pub async fn notify_presence(
        &self,
        session_id: &SessionId,
        room_id: &RoomId,
        payload: &str,
    ) -> Vec<SessionId> {
        self.hub.broadcast(room_id, payload, Some(session_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_CODE, Language};
    use crate::infrastructure::broadcast::WebSocketBroadcaster;
    use crate::infrastructure::store::InMemoryRoomStore;
    use tokio::sync::mpsc;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn build_usecase() -> (
        JoinRoomUseCase,
        Arc<InMemoryRoomStore>,
        Arc<WebSocketBroadcaster>,
    ) {
        let store = Arc::new(InMemoryRoomStore::new());
        let hub = Arc::new(WebSocketBroadcaster::new());
        let usecase = JoinRoomUseCase::new(store.clone(), hub.clone());
        (usecase, store, hub)
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
    async fn test_first_join_creates_room_with_defaults() {
        // given:
        let (usecase, store, hub) = build_usecase();
        let (alice, _rx) = connect(&hub).await;
        let r = room("interview-1");

        // when:
        let snapshot = usecase.execute(&alice, &r).await;

        // then:
        assert_eq!(snapshot.code, DEFAULT_CODE);
        assert_eq!(snapshot.language, Language::JavaScript);
        assert!(store.snapshot(&r).await.is_some());
        assert_eq!(hub.joined_room(&alice).await, Some(r));
    }

    #[tokio::test]
    async fn test_late_joiner_receives_folded_state() {
        // given: a sequence of prior mutations applied in arrival order
        let (usecase, store, hub) = build_usecase();
        let (alice, _rx_alice) = connect(&hub).await;
        let r = room("interview-1");
        usecase.execute(&alice, &r).await;
        store.set_code(&r, "v1".to_string()).await;
        store
            .set_language(&r, Language::Python, Some("print('v2')".to_string()))
            .await;
        store.set_code(&r, "print('v3')".to_string()).await;

        // when: a new session joins
        let (bob, _rx_bob) = connect(&hub).await;
        let snapshot = usecase.execute(&bob, &r).await;

        // then: the snapshot equals the fold of the event sequence
        assert_eq!(snapshot.code, "print('v3')");
        assert_eq!(snapshot.language, Language::Python);
    }

    #[tokio::test]
    async fn test_double_join_does_not_reset_state() {
        // given:
        let (usecase, store, hub) = build_usecase();
        let (alice, _rx) = connect(&hub).await;
        let r = room("interview-1");
        usecase.execute(&alice, &r).await;
        store.set_code(&r, "edited".to_string()).await;

        // when: the same session joins the same room again
        let snapshot = usecase.execute(&alice, &r).await;

        // then:
        assert_eq!(snapshot.code, "edited");
        assert_eq!(hub.joined_room(&alice).await, Some(r));
    }

    #[tokio::test]
    async fn test_joining_second_room_moves_membership() {
        // given:
        let (usecase, _store, hub) = build_usecase();
        let (alice, mut rx_alice) = connect(&hub).await;
        let r1 = room("r1");
        let r2 = room("r2");
        usecase.execute(&alice, &r1).await;

        // when:
        usecase.execute(&alice, &r2).await;

        // then: broadcasts for the first room no longer reach the session
        assert_eq!(hub.joined_room(&alice).await, Some(r2));
        hub.broadcast(&r1, "frame", None).await;
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_presence_notice_excludes_joiner() {
        // given:
        let (usecase, _store, hub) = build_usecase();
        let (alice, mut rx_alice) = connect(&hub).await;
        let (bob, mut rx_bob) = connect(&hub).await;
        let r = room("r");
        usecase.execute(&alice, &r).await;
        usecase.execute(&bob, &r).await;

        // when:
        let targeted = usecase.notify_presence(&bob, &r, "bob joined").await;

        // then:
        assert_eq!(targeted, vec![alice]);
        assert_eq!(rx_alice.recv().await, Some("bob joined".to_string()));
        assert!(rx_bob.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_push_snapshot_targets_joiner_only() {
        // given:
        let (usecase, _store, hub) = build_usecase();
        let (alice, mut rx_alice) = connect(&hub).await;
        let (bob, mut rx_bob) = connect(&hub).await;
        let r = room("r");
        usecase.execute(&alice, &r).await;
        usecase.execute(&bob, &r).await;

        // when:
        usecase.push_snapshot(&bob, "snapshot").await.unwrap();

        // then:
        assert_eq!(rx_bob.recv().await, Some("snapshot".to_string()));
        assert!(rx_alice.try_recv().is_err());
    }
}

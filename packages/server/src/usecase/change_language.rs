//! UseCase: language switch.

use std::sync::Arc;

use crate::domain::{Language, RoomBroadcaster, RoomId, RoomStore, SessionId};

use super::error::StaleEvent;

/// Handles a language-change event.
///
/// Unlike code edits, the resulting broadcasts include the sender: its UI
/// confirms the template application through the same code path every
/// other client uses, so there is exactly one rendering path. A template,
/// when present, is sent as a separate code-change broadcast; both frames
/// reach every member, in unspecified relative order.
pub struct ChangeLanguageUseCase {
    store: Arc<dyn RoomStore>,
    hub: Arc<dyn RoomBroadcaster>,
}

impl ChangeLanguageUseCase {
    pub fn new(store: Arc<dyn RoomStore>, hub: Arc<dyn RoomBroadcaster>) -> Self {
        Self { store, hub }
    }

    /// Apply the switch and broadcast to the whole room.
    ///
    /// `template_payload` / `language_payload` are the serialized
    /// code-change and language-change events derived from the same parsed
    /// intent; `template_payload` must be present exactly when `template`
    /// is. Returns the sessions targeted by the language broadcast, or
    /// [`StaleEvent`] when the room has never been joined.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        language: Language,
        template: Option<String>,
        template_payload: Option<String>,
        language_payload: String,
    ) -> Result<Vec<SessionId>, StaleEvent> {
        if !self.store.set_language(room_id, language, template).await {
            return Err(StaleEvent(room_id.as_str().to_string()));
        }

        if let Some(template_payload) = template_payload {
            self.hub.broadcast(room_id, &template_payload, None).await;
        }

        Ok(self.hub.broadcast(room_id, &language_payload, None).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::broadcast::WebSocketBroadcaster;
    use crate::infrastructure::store::InMemoryRoomStore;
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

    fn build_usecase() -> (
        ChangeLanguageUseCase,
        Arc<InMemoryRoomStore>,
        Arc<WebSocketBroadcaster>,
    ) {
        let store = Arc::new(InMemoryRoomStore::new());
        let hub = Arc::new(WebSocketBroadcaster::new());
        let usecase = ChangeLanguageUseCase::new(store.clone(), hub.clone());
        (usecase, store, hub)
    }

    #[tokio::test]
    async fn test_switch_with_template_broadcasts_both_frames_to_all() {
        // given:
        let (usecase, store, hub) = build_usecase();
        let (alice, mut rx_alice) = connect(&hub).await;
        let (bob, mut rx_bob) = connect(&hub).await;
        let r = room("r");
        store.get_or_create(&r).await;
        hub.join(&alice, &r).await;
        hub.join(&bob, &r).await;

        // when: alice switches to python with a template
        let result = usecase
            .execute(
                &r,
                Language::Python,
                Some("print('Hello')".to_string()),
                Some("code-payload".to_string()),
                "lang-payload".to_string(),
            )
            .await;

        // then: store holds both fields, and every member (sender
        // included) receives both frames
        let targeted = result.unwrap();
        assert_eq!(targeted.len(), 2);
        let state = store.snapshot(&r).await.unwrap();
        assert_eq!(state.language, Language::Python);
        assert_eq!(state.code, "print('Hello')");
        for rx in [&mut rx_alice, &mut rx_bob] {
            assert_eq!(rx.recv().await, Some("code-payload".to_string()));
            assert_eq!(rx.recv().await, Some("lang-payload".to_string()));
        }
    }

    #[tokio::test]
    async fn test_switch_without_template_keeps_buffer() {
        // given:
        let (usecase, store, hub) = build_usecase();
        let (alice, mut rx_alice) = connect(&hub).await;
        let r = room("r");
        store.get_or_create(&r).await;
        store.set_code(&r, "keep me".to_string()).await;
        hub.join(&alice, &r).await;

        // when:
        let result = usecase
            .execute(&r, Language::Java, None, None, "lang-payload".to_string())
            .await;

        // then: one frame only, code untouched
        assert!(result.is_ok());
        let state = store.snapshot(&r).await.unwrap();
        assert_eq!(state.language, Language::Java);
        assert_eq!(state.code, "keep me");
        assert_eq!(rx_alice.recv().await, Some("lang-payload".to_string()));
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_switch_for_unknown_room_is_stale() {
        // given:
        let (usecase, _store, hub) = build_usecase();
        let (_alice, mut rx_alice) = connect(&hub).await;

        // when:
        let result = usecase
            .execute(
                &room("ghost"),
                Language::R,
                Some("x".to_string()),
                Some("code-payload".to_string()),
                "lang-payload".to_string(),
            )
            .await;

        // then:
        assert_eq!(result, Err(StaleEvent("ghost".to_string())));
        assert!(rx_alice.try_recv().is_err());
    }
}

//! Room store trait definition.
//!
//! The domain layer defines the interface it needs for room state access;
//! the infrastructure layer provides the concrete implementation
//! (dependency inversion, as with [`super::RoomBroadcaster`]).

use async_trait::async_trait;

use super::room::RoomState;
use super::value_object::{Language, RoomId};

/// Authoritative store of room state, keyed by room id.
///
/// Rooms are created lazily on first join and never removed; the store
/// lives for the process lifetime. Mutations on unknown rooms are silent
/// no-ops (a change event arriving before any join is a stale event, not
/// an error) and report `false` so callers can skip the broadcast.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Return the room's state, creating it with defaults if absent.
    /// Idempotent; never fails.
    async fn get_or_create(&self, room_id: &RoomId) -> RoomState;

    /// Overwrite the room's code buffer. Returns `false` (no-op) when the
    /// room is unknown.
    async fn set_code(&self, room_id: &RoomId, code: String) -> bool;

    /// Overwrite the room's language, and its code buffer too when a
    /// template is supplied (a language switch resets the buffer to that
    /// language's boilerplate). Returns `false` (no-op) when the room is
    /// unknown.
    async fn set_language(
        &self,
        room_id: &RoomId,
        language: Language,
        template: Option<String>,
    ) -> bool;

    /// Read-only copy of the room's state, if the room exists.
    async fn snapshot(&self, room_id: &RoomId) -> Option<RoomState>;
}

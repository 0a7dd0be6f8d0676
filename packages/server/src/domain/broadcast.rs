//! Broadcast group membership trait definition.
//!
//! Abstracts the transport's notion of per-room delivery groups behind an
//! explicit interface owned by the synchronization core, independent of
//! any websocket library's built-in grouping feature.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::{RoomId, SessionId};

/// Per-session outbound channel carrying serialized frames.
///
/// The transport layer drains the paired receiver into the actual socket.
pub type SessionChannel = mpsc::UnboundedSender<String>;

/// Errors for single-target delivery
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("session '{0}' is not registered")]
    SessionNotFound(String),

    #[error("failed to push message to session '{0}': {1}")]
    PushFailed(String, String),
}

/// Session registry and room broadcast hub.
///
/// Tracks which sessions are connected, which room each one has joined
/// (at most one), and delivers serialized events to room member sets.
#[async_trait]
pub trait RoomBroadcaster: Send + Sync {
    /// Register a freshly connected session and its outbound channel.
    async fn register_session(&self, session_id: SessionId, sender: SessionChannel);

    /// Tear down a session: drop its channel and remove it from any room
    /// it had joined. Returns the room it was a member of, if any.
    async fn unregister_session(&self, session_id: &SessionId) -> Option<RoomId>;

    /// Add the session to the room's member set. A session that had
    /// already joined another room leaves it first, so membership in at
    /// most one room holds at all times.
    async fn join(&self, session_id: &SessionId, room_id: &RoomId);

    /// Remove the session from the room's member set.
    async fn leave(&self, session_id: &SessionId, room_id: &RoomId);

    /// The room the session currently observes, if any.
    async fn joined_room(&self, session_id: &SessionId) -> Option<RoomId>;

    /// Deliver a frame to a single session.
    async fn push_to(&self, session_id: &SessionId, content: &str) -> Result<(), BroadcastError>;

    /// Deliver a frame to every member of the room, optionally excluding
    /// one session (the sender). Per-target failures are tolerated.
    /// Returns the sessions that were targeted.
    async fn broadcast(
        &self,
        room_id: &RoomId,
        content: &str,
        exclude: Option<&SessionId>,
    ) -> Vec<SessionId>;
}

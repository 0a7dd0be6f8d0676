//! Wire format of the room synchronization protocol.
//!
//! Every frame is a JSON object tagged with a `type` field. The client
//! crate reuses these types for its side of the channel, so both ends
//! are compiled from one definition.

use serde::{Deserialize, Serialize};

use crate::domain::Language;

/// Events a client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join a room (creating it if it does not exist yet) and request the
    /// current snapshot.
    JoinRoom { room_id: String },

    /// Overwrite the room's code buffer.
    CodeChange { room_id: String, code: String },

    /// Switch the room's language; an attached template also resets the
    /// buffer to that language's boilerplate.
    LanguageChange {
        room_id: String,
        language: Language,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },

    /// Relay a chat message to the room. `sender` is the session id the
    /// client was assigned at connect.
    ChatMessage {
        room_id: String,
        message: String,
        sender: String,
        sender_name: String,
    },
}

/// Events the server sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Handshake: announces the session id the transport assigned to this
    /// connection. Sent once, before anything else.
    Connected { session_id: String },

    /// Full room snapshot. Reply-only: sent to the joining session.
    SyncState { code: String, language: Language },

    /// Presence notice, sent to the other members when a session joins.
    UserJoined { session_id: String },

    /// New buffer contents. Sent to the other members on an edit (the
    /// sender already holds the value), and to all members including the
    /// sender when a language template is applied.
    CodeChange { code: String },

    /// New language value, sent to all members including the sender.
    LanguageChange { language: Language },

    /// Chat relay, sent to all members including the sender; the client
    /// marks its own messages by comparing `sender` to its session id.
    ChatMessage {
        message: String,
        sender: String,
        sender_name: String,
        /// Unix millis, stamped by the server at broadcast time.
        timestamp: i64,
    },
}

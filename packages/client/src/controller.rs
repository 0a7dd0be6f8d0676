//! Local room state machine.
//!
//! Pure logic, no side effects: the session runner feeds inbound events
//! into [`RoomController::apply`] and sends whatever the intent methods
//! return. Keeping the state transitions free of I/O makes them easy to
//! test.

use coderoom_server::domain::Language;
use coderoom_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use crate::templates::starter_template;

/// Placeholder buffer contents until the join snapshot arrives.
pub const LOADING_CODE: &str = "// Loading...";

/// One rendered chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub text: String,
    pub sender: String,
    pub sender_name: String,
    pub timestamp: i64,
    /// Whether this is our own message, echoed back by the server. Decided
    /// by comparing the sender field against our own session id.
    pub is_me: bool,
}

/// Client-side mirror of one room.
///
/// Every inbound event overwrites the local mirrors directly; the server
/// is the single ordering authority per room, so no conflict resolution
/// happens here. Local edits are applied optimistically for input latency
/// and forwarded as intents; the server mirrors edits only to the *other*
/// sessions, so our own edit never comes back and no echo correction is
/// needed.
#[derive(Debug)]
pub struct RoomController {
    room_id: String,
    session_id: Option<String>,
    code: String,
    language: Language,
    messages: Vec<ChatEntry>,
}

impl RoomController {
    pub fn new(room_id: String) -> Self {
        Self {
            room_id,
            session_id: None,
            code: LOADING_CODE.to_string(),
            language: Language::JavaScript,
            messages: Vec::new(),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Our transport-assigned identity, once the handshake has arrived.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn messages(&self) -> &[ChatEntry] {
        &self.messages
    }

    /// The join intent, emitted once after connecting.
    pub fn join_intent(&self) -> ClientEvent {
        ClientEvent::JoinRoom {
            room_id: self.room_id.clone(),
        }
    }

    /// Apply an inbound synchronization event by direct overwrite.
    pub fn apply(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Connected { session_id } => {
                self.session_id = Some(session_id);
            }
            ServerEvent::SyncState { code, language } => {
                self.code = code;
                self.language = language;
            }
            // Presence is display-only; nothing to mirror
            ServerEvent::UserJoined { .. } => {}
            ServerEvent::CodeChange { code } => {
                self.code = code;
            }
            ServerEvent::LanguageChange { language } => {
                self.language = language;
            }
            ServerEvent::ChatMessage {
                message,
                sender,
                sender_name,
                timestamp,
            } => {
                let is_me = self.session_id.as_deref() == Some(sender.as_str());
                self.messages.push(ChatEntry {
                    text: message,
                    sender,
                    sender_name,
                    timestamp,
                    is_me,
                });
            }
        }
    }

    /// Optimistic local edit plus the intent to forward.
    pub fn edit(&mut self, code: String) -> ClientEvent {
        self.code = code.clone();
        ClientEvent::CodeChange {
            room_id: self.room_id.clone(),
            code,
        }
    }

    /// Optimistic language switch: the starter template is applied locally
    /// right away and attached to the intent, so the server resets the
    /// shared buffer to the same boilerplate.
    pub fn switch_language(&mut self, language: Language) -> ClientEvent {
        let template = starter_template(language);
        self.language = language;
        self.code = template.to_string();
        ClientEvent::LanguageChange {
            room_id: self.room_id.clone(),
            language,
            template: Some(template.to_string()),
        }
    }

    /// A chat intent. Not appended locally: the server broadcast includes
    /// us, so our own message renders through `apply` exactly like
    /// everyone else's. Returns `None` before the handshake, when we have
    /// no identity to attach.
    pub fn compose_chat(&self, text: String, sender_name: String) -> Option<ClientEvent> {
        let sender = self.session_id.clone()?;
        Some(ClientEvent::ChatMessage {
            room_id: self.room_id.clone(),
            message: text,
            sender,
            sender_name,
        })
    }
}

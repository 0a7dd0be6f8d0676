//! Transient chat message entity.

/// A chat message in flight.
///
/// Never stored: built when a chat-message event arrives, stamped with the
/// server clock, broadcast to the room (sender included), and dropped.
/// `sender` is the session id the sending client reported for itself; the
/// receiving clients compare it against their own session id to mark their
/// own messages. `sender_name` is relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: String,
    pub sender_name: String,
    /// Unix millis, assigned at broadcast time (not at send time).
    pub timestamp: i64,
}

//! UseCase error types.

use thiserror::Error;

/// A code-change or language-change event referenced a room that has never
/// been joined.
///
/// This is the one error class of the mutation path: the event is treated
/// as stale (it raced a join or carries a bogus room id) and dropped. It
/// is never surfaced to any client; the transport layer consumes it with a
/// debug log.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("room '{0}' has no state; dropping stale event")]
pub struct StaleEvent(pub String);

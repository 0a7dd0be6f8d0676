//! Error types for the room client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server closed the channel before announcing a session id
    #[error("Connection closed before the session handshake")]
    HandshakeMissing,
}

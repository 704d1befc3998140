//! Error types for the terminal chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server closed the connection
    #[error("Connection lost")]
    ConnectionLost,

    /// Gave up after the maximum number of reconnection attempts
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),

    /// Input line that does not form a valid command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Outbound frame could not be encoded
    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

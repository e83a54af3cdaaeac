//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur in transport operations.
///
/// Loss of the underlying channel is fatal: the serve loop returns the
/// error and the process terminates; no partial-response recovery is
/// attempted.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from the inbound channel.
    #[error("Read error: {0}")]
    Read(String),

    /// Failed to write to the outbound channel.
    #[error("Write error: {0}")]
    Write(String),

    /// The response channel or writer task went away.
    #[error("Channel closed: {0}")]
    ChannelClosed(String),

    /// JSON serialization error while encoding a response.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransportError {
    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}

//! Error types for mcremote
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using McError
pub type Result<T> = std::result::Result<T, McError>;

/// Unified error type for mcremote operations
#[derive(Debug, Error)]
pub enum McError {
    // -------------------------------------------------------------------------
    // Transport Errors (fatal to the connection)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Connection is closed")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The server answered with a line starting with `Fail`.
    /// The connection stays usable.
    #[error("Server failure: {0}")]
    ServerFail(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl McError {
    /// True for errors that leave the connection Closed
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            McError::Io(_) | McError::Network(_) | McError::ConnectionClosed
        )
    }

    /// True when the server rejected the request with a `Fail` line
    pub fn is_server_fail(&self) -> bool {
        matches!(self, McError::ServerFail(_))
    }
}

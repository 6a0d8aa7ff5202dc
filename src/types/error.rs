use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when using the realtime client.
#[derive(Error, Debug)]
pub enum RealtimeError {
    /// WebSocket protocol error (handshake failed, invalid frame, etc.)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// General connection error with descriptive message
    #[error("Connection error: {0}")]
    Connection(String),

    /// A single open attempt did not complete within the configured timeout
    #[error("Connection timed out after {0:?}")]
    ConnectionTimeout(Duration),

    /// Inbound frame could not be decoded into an event envelope
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Command argument contains the wire delimiter
    #[error("Invalid argument {argument:?} for command '{kind}': must not contain ':'")]
    InvalidCommandArgument { kind: String, argument: String },

    /// Client options violate their invariants
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// URL parsing error (malformed endpoint URL)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Attempted to write while no transport is open
    #[error("Not connected")]
    NotConnected,

    /// The client was closed while the operation was in flight
    #[error("Client closed")]
    Closed,
}

/// Convenience type alias for `Result<T, RealtimeError>`.
pub type Result<T> = std::result::Result<T, RealtimeError>;

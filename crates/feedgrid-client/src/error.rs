//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
///
/// Feed retrieval and decoding failures are not represented here: the
/// pipeline falls back to an empty schedule instead of failing a command.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// No event at the requested position.
    NoSuchEvent(usize),
    /// Output could not be serialized.
    Output(String),
    /// Action failed (open).
    Action(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::NoSuchEvent(index) => write!(f, "no event #{} (run `feedgrid list`)", index),
            Self::Output(msg) => write!(f, "output error: {}", msg),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

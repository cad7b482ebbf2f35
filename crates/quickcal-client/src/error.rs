//! Client error types.

use std::fmt;

use quickcal_core::{PageError, ZoneError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// The page cannot be processed.
    Page(PageError),
    /// Action failed (open, copy).
    Action(String),
    /// Output could not be serialized.
    Serialization(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Page(err) => write!(f, "page error: {}", err),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Page(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<PageError> for ClientError {
    fn from(err: PageError) -> Self {
        Self::Page(err)
    }
}

impl From<ZoneError> for ClientError {
    fn from(err: ZoneError) -> Self {
        Self::Config(err.to_string())
    }
}

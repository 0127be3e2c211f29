use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// The request never produced a response (DNS, refused connection, TLS).
    Transport,
    /// The endpoint answered with a non-success status.
    HttpStatus,
    /// The body was not a country array.
    Decode,
}

/// The single failure the country list retrieval can end in.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Transport, message)
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(
            FetchErrorKind::HttpStatus,
            format!("HTTP {status}: {}", message.into()),
        )
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Decode, message)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::decode(format!("invalid country payload: {value}"))
    }
}

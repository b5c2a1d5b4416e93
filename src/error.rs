use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Timed out after {0:?} waiting for a page of trades")]
    Timeout(Duration),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("General error: {0}")]
    Other(String),
}

impl Error {
    /// Diagnostic detail worth surfacing to API callers, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::Upstream { body, .. } if !body.is_empty() => Some(body.clone()),
            Error::Fetch(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Fetch(format!("request timed out: {}", err))
        } else {
            Error::Fetch(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ABOUTME: Error types for calls against the node API
// Server errors display as the bare server message so UI prefixes read naturally

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status. Displays only the message.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid node URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

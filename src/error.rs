//! Error types for protocol extraction and retrieval

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Score not found")]
    ScoreNotFound,

    #[error("Malformed score: {0:?}")]
    MalformedScore(String),

    #[error("Invalid {context}: {value:?}")]
    InvalidNumber {
        context: &'static str,
        value: String,
    },

    #[error("More than two teams found ({0})")]
    TooManyTeams(usize),

    #[error("Expected two teams, found {0}")]
    MissingTeams(usize),

    #[error("Missing element: {context}")]
    MissingElement { context: &'static str },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Game {0} does not exist")]
    GameNotFound(u32),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Response body is not valid UTF-8")]
    InvalidUtf8,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ureq::Error> for ProtocolError {
    fn from(e: ureq::Error) -> Self {
        ProtocolError::Http(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

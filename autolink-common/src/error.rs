use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AutolinkError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Search root '{}' could not be read: {message}", .path.display())]
    SearchRoot { path: PathBuf, message: String },

    #[error("Invalid generation target '{}': {message}", .path.display())]
    InvalidTarget { path: PathBuf, message: String },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("Parsing Error in {0}: {1}")]
    ParseError(&'static str, String),

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Generic Error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for AutolinkError {
    fn from(err: std::io::Error) -> Self {
        AutolinkError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for AutolinkError {
    fn from(err: serde_json::Error) -> Self {
        AutolinkError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, AutolinkError>;

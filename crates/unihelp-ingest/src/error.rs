//! Error types for the processing pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while processing a document.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] unihelp_config::ConfigError),

    #[error("Record error: {0}")]
    Record(#[from] unihelp_core::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt file {path}: {message}")]
    CorruptFile { path: PathBuf, message: String },

    #[error("Invalid chunk configuration: {0}")]
    InvalidChunkConfig(String),

    #[error("Invalid vocabulary pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Index sink error: {0}")]
    Index(String),
}

impl IngestError {
    pub(crate) fn corrupt(path: &std::path::Path, message: impl Into<String>) -> Self {
        IngestError::CorruptFile {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

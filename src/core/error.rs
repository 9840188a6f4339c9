use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid symbol name \"{0}\"")]
    InvalidName(String),
    #[error("Host failed to include {}: {message}", .file.display())]
    Host { file: PathBuf, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl LoadError {
    /// Errors the hook boundary absorbs so the next resolver in the chain runs.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LoadError::InvalidName(_))
    }
}

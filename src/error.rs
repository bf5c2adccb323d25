//! Error type shared by every operation.

use thiserror::Error;

/// Represents errors that can occur while driving the openssl tool.
///
/// Every variant carries a human-readable message meant to be shown to the
/// user as is.
#[derive(Debug, Error)]
pub enum OpensslError {
    /// The tool executable could not be spawned.
    #[error("openssl executable not found: {0}")]
    ToolNotFound(String),

    /// The tool ran but exited with a failure status.
    #[error("openssl failed: {0}")]
    ExecutionFailed(String),

    /// A request field cannot be passed to the tool.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A path could not be rewritten for the tool.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Temporary file creation or read-back failed.
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// The configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_norway::Error> for OpensslError {
    fn from(err: serde_norway::Error) -> Self {
        OpensslError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpensslError>;

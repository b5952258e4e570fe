use thiserror::Error;

/// Result type for stream statistics operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur while processing a stream
#[derive(Error, Debug)]
pub enum StatsError {
    /// Reading from the stream source failed
    #[error("Stream read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The run was cancelled before the stream was exhausted
    #[error("Stream processing was cancelled")]
    Cancelled,

    /// The report sink could not deliver a snapshot
    #[error("Report dispatch failed: {0}")]
    Sink(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StatsError {
    /// Whether this error is a cancellation outcome rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StatsError::Cancelled)
    }

    pub(crate) fn sink(err: impl std::fmt::Display) -> Self {
        StatsError::Sink(err.to_string())
    }
}

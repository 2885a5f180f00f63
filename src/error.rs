use thiserror::Error;

/// Errors that can occur while loading data or producing the visual artifact
#[derive(Debug, Error)]
pub enum MoodMapError {
    /// I/O error while reading a dataset resource
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset document could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Render driver failed to produce an artifact
    #[error("Render error: {0}")]
    Render(String),
}

/// Type alias for Results using MoodMapError
pub type Result<T> = std::result::Result<T, MoodMapError>;

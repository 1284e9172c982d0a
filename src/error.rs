//! Error types for pawnix

use thiserror::Error;

/// Result type alias for pawnix operations
pub type Result<T> = std::result::Result<T, PawnixError>;

/// Engine error types
#[derive(Error, Debug)]
pub enum PawnixError {
    /// The search string is not a valid regular expression
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}

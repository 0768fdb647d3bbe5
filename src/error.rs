//! Error types for etfscreen

use thiserror::Error;

/// Main error type for etfscreen
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Bad price series for {ticker}: {reason}")]
    BadSeries { ticker: String, reason: String },

    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for etfscreen operations
pub type Result<T> = std::result::Result<T, ScreenError>;

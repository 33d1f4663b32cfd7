//! Error types for browserstats

use thiserror::Error;

/// Main error type for browserstats operations
#[derive(Debug, Error)]
pub enum StatsError {
    /// A requested feature is not in the registry
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
    /// A composite key could not be split into browser and version
    #[error("invalid browser version key: {0:?}")]
    InvalidKey(String),
    /// A dataset source string could not be interpreted
    #[error("invalid data source: {0}")]
    InvalidSource(String),
    /// Loader-side failures
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Dataset JSON could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport-level HTTP failure
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl StatsError {
    /// Whether this error came from caller input rather than from loading data
    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::UnknownFeature(_) | Self::InvalidKey(_))
    }
}

/// Convenience Result type for browserstats operations
pub type Result<T> = std::result::Result<T, StatsError>;

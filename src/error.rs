//! Unified error types for the tile store.

use std::fmt;

/// Store-specific errors.
#[derive(Debug)]
pub enum StoreError {
    /// Error decoding or encoding a tile image
    Image(String),
    /// Error enumerating or clearing the durable storage directory
    StorageScan(String),
    /// Error reading or writing the preferences file
    Preferences(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Image(msg) => write!(f, "tile image error: {}", msg),
            StoreError::StorageScan(msg) => write!(f, "storage directory error: {}", msg),
            StoreError::Preferences(msg) => write!(f, "preferences error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<image::ImageError> for StoreError {
    fn from(err: image::ImageError) -> Self {
        StoreError::Image(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::StorageScan(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Preferences(err.to_string())
    }
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, StoreError>;

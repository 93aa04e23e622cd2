// src/error.rs

//! Unified error handling for the feed archiver.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for archiver operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// A persisted file could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Banner image could not be rendered
    #[error("Image error: {0}")]
    Image(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an image rendering error.
    pub fn image(message: impl std::fmt::Display) -> Self {
        Self::Image(message.to_string())
    }
}

/// Why a persisted JSON file could not be read.
///
/// `NotFound` and `Parse` both mean "no usable local data"; callers decide
/// whether that is an empty collection or a message for the user.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// True when the file is missing or unreadable as JSON.
    pub fn is_absent_or_corrupt(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Parse { .. })
    }
}

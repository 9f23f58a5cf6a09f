// src/error.rs

//! Unified error handling for the slot watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for slot watcher operations.
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

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Fetching a month's calendar page failed
    #[error("Error fetching {month}/{year}: {message}")]
    Fetch {
        month: u32,
        year: i32,
        message: String,
    },

    /// Alert playback or acknowledgement failed
    #[error("Alert error: {0}")]
    Alert(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error for a given month.
    pub fn fetch(month: u32, year: i32, message: impl fmt::Display) -> Self {
        Self::Fetch {
            month,
            year,
            message: message.to_string(),
        }
    }

    /// Create an alert error.
    pub fn alert(message: impl fmt::Display) -> Self {
        Self::Alert(message.to_string())
    }
}

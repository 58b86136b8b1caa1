//! Error types and handling for the sunshine finder

use thiserror::Error;

/// Main error type for the sunshine finder
#[derive(Error, Debug)]
pub enum SunshineError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The current position could not be determined. Fatal for a search.
    #[error("Failed to get current location: {message}")]
    Location { message: String },

    /// A single weather lookup failed (network, status or payload)
    #[error("Failed to fetch weather data: {message}")]
    Weather { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl SunshineError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new location error
    pub fn location<S: Into<String>>(message: S) -> Self {
        Self::Location {
            message: message.into(),
        }
    }

    /// Create a new weather error
    pub fn weather<S: Into<String>>(message: S) -> Self {
        Self::Weather {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SunshineError {
    fn from(err: reqwest::Error) -> Self {
        SunshineError::weather(err.to_string())
    }
}

//! Error types and handling for the `playreach` application

use thiserror::Error;

/// Main error type for the `playreach` application
#[derive(Error, Debug)]
pub enum PlayreachError {
    /// Playground feature query failed (network, HTTP status or malformed body)
    #[error("Playground data query failed: {message}")]
    Upstream { message: String },

    /// Analysis was requested before a map point was selected
    #[error("No analysis point selected")]
    NoPointSelected,

    /// Export was requested before any analysis was run
    #[error("No analysis results available")]
    NoAnalysis,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlayreachError {
    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlayreachError::Upstream { .. } => {
                "Unable to reach the playground data service. Please check your internet connection."
                    .to_string()
            }
            PlayreachError::NoPointSelected => {
                "Please select a point on the map first.".to_string()
            }
            PlayreachError::NoAnalysis => "Please run an analysis first.".to_string(),
            PlayreachError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PlayreachError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PlayreachError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

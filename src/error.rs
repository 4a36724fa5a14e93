//! Error types for loading evaluator configuration
//!
//! Only configuration can fail. Malformed action content never produces an
//! `Err`; it is reported through diagnostics on the evaluation result.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a layout descriptor
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read layout file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layout TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid layout: {reason}")]
    Invalid { reason: String },
}

impl ConfigError {
    /// Create an I/O error tagged with the offending path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

//! Structured error types for configuration operations.

use std::path::PathBuf;

/// Failure inside a format codec, tagged by the format that produced it.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Library-level structured errors.
///
/// Consumers can match on these; plain write failures are reported through
/// the boolean return of `Configuration::set` instead, everything else
/// surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid format: {given}, supported formats are: .json, .yml")]
    UnsupportedFormat { given: String },

    #[error("Invalid file: {}", path.display())]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration path: {path}")]
    InvalidPath { path: String },

    #[error("Invalid pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("Failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode configuration for {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Error types for emoji-dl
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Enumeration, Normalize, Config, etc.)
//! - Context information (file path, configuration key, etc.)
//!
//! Per-emoji fetch failures are deliberately *not* represented here: the
//! fetch engine records them as [`crate::types::FetchOutcome::Failed`] and
//! keeps going. Only errors that halt a whole operation surface as [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for emoji-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for emoji-dl
///
/// This is the primary error type used throughout the library. Each variant
/// includes contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "output_dir")
        key: Option<String>,
    },

    /// Platform enumeration or authentication error
    #[error("enumeration error: {0}")]
    Enumeration(String),

    /// Normalization error (transcode produced no usable output)
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// External tool execution failed (ffmpeg)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Operation not supported (missing binary, not implemented, etc.)
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Template rendering error
    #[error("template error: {0}")]
    Template(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Normalization errors
///
/// All of these abort the whole normalization pass: a silently missing or
/// truncated emoji is worse than an unconverted one.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The transcoder finished but produced no output file
    #[error("transcode produced no output at {path}")]
    MissingOutput {
        /// The temporary output path that should have been written
        path: PathBuf,
    },

    /// The transcoder produced a zero-byte output file
    #[error("transcode produced an empty file at {path}")]
    EmptyOutput {
        /// The temporary output path that was written empty
        path: PathBuf,
    },

    /// Swapping the transcoded file over the original failed
    #[error("failed to replace {path}: {reason}")]
    ReplaceFailed {
        /// The original file being replaced
        path: PathBuf,
        /// The reason the delete+rename swap failed
        reason: String,
    },
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_includes_message() {
        let err = Error::Config {
            message: "normalize size must be positive".into(),
            key: Some("size".into()),
        };
        assert!(err.to_string().contains("normalize size must be positive"));
    }

    #[test]
    fn normalize_error_display_includes_path() {
        let err = Error::Normalize(NormalizeError::EmptyOutput {
            path: PathBuf::from("/tmp/emojis/guild.smile_temp.png"),
        });
        let msg = err.to_string();
        assert!(msg.contains("empty"), "message should describe the failure: {msg}");
        assert!(msg.contains("guild.smile_temp.png"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn normalize_error_converts_via_from() {
        let err: Error = NormalizeError::MissingOutput {
            path: PathBuf::from("/tmp/out.gif"),
        }
        .into();
        assert!(matches!(err, Error::Normalize(_)));
    }
}

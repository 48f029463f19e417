//! Error types for nagstage
//!
//! Library code returns `NagstageError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nagstage operations
pub type NagstageResult<T> = Result<T, NagstageError>;

/// Main error type for nagstage operations
#[derive(Error, Debug)]
pub enum NagstageError {
    /// Staging or production directory missing, not creatable or not writable
    #[error("{reason}: {path}")]
    Permission { path: PathBuf, reason: String },

    /// Checker or service-control binary is absent
    #[error("unable to detect {role} at {path}")]
    MissingBinary { role: &'static str, path: PathBuf },

    /// Required source data was empty (bypassed by a forced build)
    #[error("{0}")]
    IncompleteSourceData(String),

    /// A host-search resolver failed
    #[error("resolver for '{location}' failed: {message}")]
    Resolver { location: String, message: String },

    /// No resolver registered for a host-search location
    #[error("no resolver registered for location '{location}'")]
    ResolverNotFound { location: String },

    /// The ingestion source could not deliver a document
    #[error("deployment source error: {0}")]
    Source(String),

    /// A field that must be encoded upstream did not decode
    #[error("field '{key}' is not valid base64")]
    InvalidEncoding { key: String },

    /// The deployment document has an unexpected shape
    #[error("invalid deployment document: {0}")]
    InvalidDocument(String),

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NagstageError {
    pub(crate) fn permission(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Permission {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether a forced build would have gone past this error
    pub fn is_incomplete_data(&self) -> bool {
        matches!(self, Self::IncompleteSourceData(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_binary() {
        let err = NagstageError::MissingBinary {
            role: "checker binary",
            path: PathBuf::from("/usr/local/nagios/bin/nagios"),
        };
        assert_eq!(
            err.to_string(),
            "unable to detect checker binary at /usr/local/nagios/bin/nagios"
        );
    }

    #[test]
    fn test_error_display_permission() {
        let err = NagstageError::permission("/tmp/saigon/prod", "unable to write to directory");
        assert_eq!(err.to_string(), "unable to write to directory: /tmp/saigon/prod");
    }

    #[test]
    fn test_incomplete_data_is_flagged() {
        let err = NagstageError::IncompleteSourceData("Initial Service Data was Empty".into());
        assert!(err.is_incomplete_data());
        assert_eq!(err.to_string(), "Initial Service Data was Empty");
    }
}

//! Domain error types
//!
//! This module defines the error hierarchy for Cadre. All errors are
//! domain-specific and don't expose third-party types.

use super::dataset::DatasetKind;
use thiserror::Error;

/// Main Cadre error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CadreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request validation errors (no kinds requested, inverted ranges, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The candidate population could not be resolved
    ///
    /// Never downgraded to an unrestricted export.
    #[error("Candidate resolution failed: {0}")]
    Resolution(StoreError),

    /// Data store errors outside of resolution
    #[error("Data store error: {0}")]
    Store(#[from] StoreError),

    /// A single dataset failed to generate
    #[error("Failed to generate {kind} dataset: {message}")]
    Generation { kind: DatasetKind, message: String },

    /// Tabular text encoding errors
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Archive construction errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// Every requested dataset failed or was dropped
    #[error("Nothing to export: none of the requested datasets could be generated")]
    NothingToExport,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Data store errors
///
/// Errors that occur when reading from the underlying data store.
/// These errors don't expose third-party driver types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to data store: {0}")]
    ConnectionFailed(String),

    /// A query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A row could not be mapped to a domain record
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Fixture file missing or unreadable
    #[error("Fixture not available: {0}")]
    FixtureUnavailable(String),
}

/// How an error should be reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself is wrong
    ClientError,
    /// Something failed on our side
    ServerError,
    /// The request was fine but produced nothing
    NoData,
}

impl CadreError {
    /// Classify the error for the response layer
    pub fn class(&self) -> ErrorClass {
        match self {
            CadreError::Validation(_) => ErrorClass::ClientError,
            CadreError::NothingToExport => ErrorClass::NoData,
            _ => ErrorClass::ServerError,
        }
    }

    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            CadreError::Validation(_) | CadreError::Configuration(_) => 2,
            CadreError::NothingToExport => 3,
            CadreError::Resolution(_) | CadreError::Store(_) => 4,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CadreError {
    fn from(err: std::io::Error) -> Self {
        CadreError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CadreError {
    fn from(err: serde_json::Error) -> Self {
        CadreError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CadreError {
    fn from(err: toml::de::Error) -> Self {
        CadreError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for CadreError {
    fn from(err: csv::Error) -> Self {
        CadreError::Encoding(err.to_string())
    }
}

impl From<zip::result::ZipError> for CadreError {
    fn from(err: zip::result::ZipError) -> Self {
        CadreError::Archive(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadre_error_display() {
        let err = CadreError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::QueryFailed("timeout".to_string());
        let err: CadreError = store_err.into();
        assert!(matches!(err, CadreError::Store(_)));
    }

    #[test]
    fn test_generation_error_names_kind() {
        let err = CadreError::Generation {
            kind: DatasetKind::Visits,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to generate visits dataset: boom");
    }

    #[test]
    fn test_error_classes() {
        assert_eq!(
            CadreError::Validation("no kinds".into()).class(),
            ErrorClass::ClientError
        );
        assert_eq!(CadreError::NothingToExport.class(), ErrorClass::NoData);
        assert_eq!(
            CadreError::Resolution(StoreError::QueryFailed("x".into())).class(),
            ErrorClass::ServerError
        );
        assert_eq!(
            CadreError::Archive("x".into()).class(),
            ErrorClass::ServerError
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CadreError::Validation("x".into()).exit_code(), 2);
        assert_eq!(CadreError::NothingToExport.exit_code(), 3);
        assert_eq!(
            CadreError::Resolution(StoreError::ConnectionFailed("x".into())).exit_code(),
            4
        );
        assert_eq!(CadreError::Archive("x".into()).exit_code(), 5);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CadreError = io_err.into();
        assert!(matches!(err, CadreError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CadreError = toml_err.into();
        assert!(matches!(err, CadreError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}

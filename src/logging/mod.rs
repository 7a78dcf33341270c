//! Logging and observability
//!
//! Structured logging through `tracing`: human-readable console output and
//! an optional JSON log file with rotation. The macros below keep the field
//! names of export events consistent across the crate.

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an export call
///
/// # Example
///
/// ```no_run
/// use cadre::log_export_start;
/// use cadre::domain::{BrandId, DatasetKind};
///
/// let brand = BrandId::new("acme").unwrap();
/// let kinds = [DatasetKind::Clients, DatasetKind::Visits];
/// log_export_start!(&brand, &kinds);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($brand:expr, $kinds:expr) => {
        tracing::info!(
            brand = %$brand,
            kinds = ?$kinds,
            "Starting export"
        );
    };
}

/// Log a dataset dropped from an export
///
/// # Example
///
/// ```no_run
/// use cadre::log_dataset_skipped;
/// use cadre::domain::{CadreError, DatasetKind};
///
/// let error = CadreError::Other("query timed out".to_string());
/// log_dataset_skipped!(DatasetKind::Visits, &error);
/// ```
#[macro_export]
macro_rules! log_dataset_skipped {
    ($kind:expr, $error:expr) => {
        tracing::warn!(
            kind = %$kind,
            error = %$error,
            "Dataset skipped"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cadre::log_error_with_context;
/// use cadre::domain::CadreError;
///
/// let error = CadreError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

//! Result type alias for Cadre

use super::errors::CadreError;

/// Result type alias for Cadre operations
///
/// # Examples
///
/// ```
/// use cadre::domain::result::Result;
/// use cadre::domain::errors::CadreError;
///
/// fn failing_function() -> Result<()> {
///     Err(CadreError::Validation("no dataset kinds requested".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CadreError>;

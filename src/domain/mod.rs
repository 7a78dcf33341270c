//! Domain models and types for Cadre.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`BrandId`], [`ClientId`])
//! - **Segmentation filters** ([`FilterSpec`] and the store-facing queries
//!   derived from it)
//! - **Populations** ([`CandidateSet`])
//! - **Datasets** ([`DatasetKind`], [`TabularBlob`], [`ExportResult`])
//! - **Source records** read from the data store ([`records`])
//! - **Error types** ([`CadreError`], [`StoreError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CadreError>`]:
//!
//! ```rust
//! use cadre::domain::{DatasetKind, Result};
//!
//! fn parse_kinds(raw: &str) -> Result<Vec<DatasetKind>> {
//!     raw.split(',').map(str::parse).collect()
//! }
//!
//! assert!(parse_kinds("clients,visits").is_ok());
//! assert!(parse_kinds("clients,kpis").is_err());
//! ```

pub mod candidate;
pub mod dataset;
pub mod errors;
pub mod filter;
pub mod ids;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use candidate::CandidateSet;
pub use dataset::{DatasetKind, EncodedBlob, ExportResult, Scoping, TabularBlob};
pub use errors::{CadreError, ErrorClass, StoreError};
pub use filter::{AssignmentQuery, DateRange, FilterSpec, MembershipQuery, PointsRange};
pub use ids::{BrandId, ClientId};
pub use result::Result;

//! Core export engine for Cadre.
//!
//! # Modules
//!
//! - [`resolve`] - Filter to candidate population
//! - [`datasets`] - The nine dataset generators and cell formatters
//! - [`encode`] - CSV encoding
//! - [`archive`] - ZIP packaging
//! - [`export`] - Orchestration and per-call summary
//!
//! # Export Workflow
//!
//! 1. **Validate**: non-empty kinds, well-formed ranges
//! 2. **Resolve**: compute the candidate population once
//! 3. **Generate**: run the requested generators concurrently, all sharing
//!    the same population
//! 4. **Encode**: render every produced dataset as CSV
//! 5. **Deliver**: one dataset as plain CSV, several as a ZIP archive
//!
//! # Example
//!
//! ```rust
//! use cadre::adapters::store::{Fixture, InMemoryStore};
//! use cadre::core::export::{ExportOrchestrator, ExportRequest, ExportSettings};
//! use cadre::domain::{BrandId, CadreError, DatasetKind, ExportResult};
//! use std::sync::Arc;
//!
//! # async fn example() -> cadre::domain::Result<()> {
//! let store = Arc::new(InMemoryStore::new(Fixture::default()));
//! let orchestrator = ExportOrchestrator::new(store, ExportSettings::default());
//!
//! let brand = BrandId::new("acme").map_err(CadreError::Validation)?;
//! let request = ExportRequest::new(brand, vec![DatasetKind::Team]);
//! let result = orchestrator.run(&request).await?;
//! assert!(matches!(result, ExportResult::Single { .. }));
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod datasets;
pub mod encode;
pub mod export;
pub mod resolve;

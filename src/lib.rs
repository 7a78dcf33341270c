//! # Cadre - segmented multi-dataset export
//!
//! Cadre exports the operational data of one brand as CSV: clients, visits,
//! loyalty memberships, promotions, surveys, products, field team,
//! competitor sightings and point-of-sale materials. One export call takes a
//! list of dataset kinds plus a segmentation filter, resolves the matching
//! client population once, generates every dataset concurrently and delivers
//! either a single CSV document or a ZIP archive with one CSV per dataset.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Population resolution, dataset generation, encoding, packaging
//!   and the export orchestrator
//! - [`adapters`] - Data stores (in-memory fixture, PostgreSQL)
//! - [`domain`] - Identifiers, filters, records, datasets and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cadre::adapters::store::create_data_store;
//! use cadre::config::load_config;
//! use cadre::core::export::{ExportOrchestrator, ExportRequest, ExportSettings};
//! use cadre::domain::{BrandId, CadreError, DatasetKind, FilterSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("cadre.toml")?;
//!     let store = create_data_store(&config)?;
//!     let orchestrator =
//!         ExportOrchestrator::new(store, ExportSettings::from_config(&config.export)?);
//!
//!     let filter: FilterSpec = serde_json::from_str(r#"{"zone": ["north"]}"#)?;
//!     let request = ExportRequest::new(
//!         BrandId::new("acme").map_err(CadreError::Validation)?,
//!         vec![DatasetKind::Clients, DatasetKind::Visits],
//!     )
//!     .with_filter(filter);
//!
//!     let result = orchestrator.run(&request).await?;
//!     println!("{} ({})", result.content_type(), result.kinds().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Partial results
//!
//! A dataset whose query fails is left out of the result and logged at
//! `warn`; the call only fails when nothing at all could be produced
//! ([`domain::CadreError::NothingToExport`]).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

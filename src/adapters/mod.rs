//! Data store integrations for Cadre.
//!
//! - [`store`] - the [`DataStore`](store::DataStore) trait, the in-memory
//!   fixture store and the factory selecting a backend from configuration
//! - [`postgresql`] - PostgreSQL implementation
//!
//! # Design Pattern
//!
//! Adapters isolate the storage backend behind a trait object
//! (`Arc<dyn DataStore>`), which is what the export engine receives. Tests
//! use the in-memory store or wrap it to inject failures.
//!
//! ```rust
//! use cadre::adapters::store::{DataStore, Fixture, InMemoryStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn DataStore> = Arc::new(InMemoryStore::new(Fixture::default()));
//! assert_eq!(store.backend_name(), "memory");
//! ```

pub mod postgresql;
pub mod store;

//! Read-only data store abstraction
//!
//! Everything the export engine reads goes through the [`DataStore`] trait,
//! so the resolver and the dataset generators never know which backend is
//! behind them.

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_data_store;
pub use memory::{Fixture, InMemoryStore};
pub use traits::{DataStore, StoreResult};

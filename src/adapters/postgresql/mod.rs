//! PostgreSQL store
//!
//! Reads clients, memberships, assignments and the brand catalogs from a
//! PostgreSQL database laid out as in `migrations/001_initial_schema.sql`.

pub mod adapter;
pub mod client;

pub use adapter::PostgreSQLStore;
pub use client::PostgreSQLClient;

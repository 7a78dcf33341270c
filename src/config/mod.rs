//! Configuration management for Cadre.
//!
//! Cadre reads a TOML file (`cadre.toml` by default) with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CADRE_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - `store_target` - `memory` or `postgresql`
//! - [`MemoryConfig`] - JSON fixture for the in-memory store
//! - [`PostgreSQLConfig`] - Connection string and pool settings
//! - [`ExportConfig`] - Concurrency, output directory and CSV dialect
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! store_target = "postgresql"
//!
//! [application]
//! log_level = "info"
//!
//! [postgresql]
//! connection_string = "${CADRE_DATABASE_URL}"
//! max_connections = 10
//!
//! [export]
//! max_concurrency = 4
//! output_dir = "./exports"
//! ```
//!
//! ```rust,no_run
//! use cadre::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cadre.toml")?;
//! println!("Store: {:?}", config.store_target);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, CadreConfig, ExportConfig, LineTerminator, LoggingConfig, MemoryConfig,
    PostgreSQLConfig, StoreTarget,
};
pub use secret::{secret_string, SecretString, SecretValue};

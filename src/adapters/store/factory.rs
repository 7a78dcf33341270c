//! Data store factory
//!
//! Builds the store selected by `store_target` in the configuration.

use crate::adapters::postgresql::{PostgreSQLClient, PostgreSQLStore};
use crate::adapters::store::{DataStore, InMemoryStore};
use crate::config::schema::{CadreConfig, StoreTarget};
use crate::domain::{CadreError, Result};
use std::sync::Arc;

/// Create a data store based on the configuration
///
/// # Errors
///
/// Returns an error if the section for the selected target is missing or
/// the backend cannot be initialized.
pub fn create_data_store(config: &CadreConfig) -> Result<Arc<dyn DataStore>> {
    match config.store_target {
        StoreTarget::Memory => {
            let memory = config.memory.as_ref().ok_or_else(|| {
                CadreError::Configuration(
                    "store_target is 'memory' but [memory] section is missing".to_string(),
                )
            })?;

            tracing::info!(fixture = %memory.fixture_path.display(), "Creating in-memory store");
            let store = InMemoryStore::from_file(&memory.fixture_path)?;

            Ok(Arc::new(store) as Arc<dyn DataStore>)
        }
        StoreTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                CadreError::Configuration(
                    "store_target is 'postgresql' but [postgresql] section is missing"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL store");
            let client = PostgreSQLClient::new(pg_config.clone())?;

            Ok(Arc::new(PostgreSQLStore::new(client)) as Arc<dyn DataStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::MemoryConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_memory_store_from_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"clients": []}"#).unwrap();
        file.flush().unwrap();

        let config = CadreConfig {
            store_target: StoreTarget::Memory,
            memory: Some(MemoryConfig {
                fixture_path: file.path().to_path_buf(),
            }),
            ..Default::default()
        };

        let store = create_data_store(&config).unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_missing_section_is_configuration_error() {
        let config = CadreConfig {
            store_target: StoreTarget::PostgreSQL,
            postgresql: None,
            ..Default::default()
        };

        let result = create_data_store(&config);
        assert!(matches!(result, Err(CadreError::Configuration(_))));
    }
}

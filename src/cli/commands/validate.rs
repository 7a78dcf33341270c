//! Validate config command implementation
//!
//! Loads and validates the configuration file, prints a summary and can
//! optionally check the configured data store.

use crate::adapters::postgresql::PostgreSQLClient;
use crate::adapters::store::create_data_store;
use crate::config::schema::{CadreConfig, LineTerminator, StoreTarget};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also connect to the configured data store
    #[arg(long)]
    pub check_store: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!();
        println!("Configuration Summary:");
        for line in summary(&config) {
            println!("  {line}");
        }
        println!();

        if !self.check_store {
            return Ok(0);
        }

        let store = match create_data_store(&config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to initialize data store");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        match store.test_connection().await {
            Ok(()) => {
                println!("✅ Data store '{}' is reachable", store.backend_name());
                Ok(0)
            }
            Err(e) => {
                println!("❌ Data store '{}' is not reachable", store.backend_name());
                println!("   Error: {e}");
                Ok(4)
            }
        }
    }
}

/// Human-readable summary lines; credentials never appear
fn summary(config: &CadreConfig) -> Vec<String> {
    let mut lines = vec![format!("Log Level: {}", config.application.log_level)];

    match config.store_target {
        StoreTarget::Memory => {
            lines.push("Store Target: memory".to_string());
            if let Some(ref memory) = config.memory {
                lines.push(format!("Fixture: {}", memory.fixture_path.display()));
            }
        }
        StoreTarget::PostgreSQL => {
            lines.push("Store Target: postgresql".to_string());
            if let Some(ref pg) = config.postgresql {
                let connection = PostgreSQLClient::new(pg.clone())
                    .map(|client| client.connection_string_safe())
                    .unwrap_or_else(|_| "<invalid>".to_string());
                lines.push(format!("PostgreSQL Connection: {connection}"));
                lines.push(format!("Max Connections: {}", pg.max_connections));
            }
        }
    }

    let export = &config.export;
    lines.push(format!("Max Concurrency: {}", export.max_concurrency));
    lines.push(format!("Output Directory: {}", export.output_dir.display()));
    lines.push(format!("Delimiter: {:?}", export.delimiter));
    lines.push(format!(
        "Line Terminator: {}",
        match export.line_terminator {
            LineTerminator::Crlf => "crlf",
            LineTerminator::Lf => "lf",
        }
    ));
    lines.push(format!("UTF-8 BOM: {}", export.utf8_bom));
    lines
}

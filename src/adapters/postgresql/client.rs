//! PostgreSQL client implementation
//!
//! Connection pooling and query execution for the read-only PostgreSQL store.

use crate::adapters::store::StoreResult;
use crate::config::schema::PostgreSQLConfig;
use crate::domain::StoreError;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::Host;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

/// PostgreSQL client for Cadre
///
/// Provides methods for connecting to PostgreSQL and running read queries
/// through a connection pool.
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Configuration
    config: PostgreSQLConfig,

    /// Host, port and database only; never credentials or options
    safe_dsn: String,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// # Arguments
    ///
    /// * `config` - PostgreSQL configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the pool
    /// cannot be built.
    pub fn new(config: PostgreSQLConfig) -> StoreResult<Self> {
        let pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .parse()
            .map_err(|e| {
                StoreError::ConnectionFailed(format!("Invalid PostgreSQL connection string: {e}"))
            })?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let safe_dsn = redacted_dsn(&pg_config);
        let manager = Manager::from_config(pg_config, NoTls, manager_config);

        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                StoreError::ConnectionFailed(format!("Failed to create connection pool: {e}"))
            })?;

        Ok(Self {
            pool,
            config,
            safe_dsn,
        })
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> StoreResult<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| StoreError::ConnectionFailed(format!("Connection test failed: {e}")))?;

        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> StoreResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            StoreError::ConnectionFailed(format!("Failed to get connection from pool: {e}"))
        })
    }

    /// Execute a query and return rows
    ///
    /// The statement timeout from the configuration is applied to the
    /// session before the query runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn query(
        &self,
        query: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Vec<Row>> {
        let client = self.get_connection().await?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds.saturating_mul(1000)
        );
        client.execute(&timeout_query, &[]).await.map_err(|e| {
            StoreError::QueryFailed(format!("Failed to set statement timeout: {e}"))
        })?;

        tracing::trace!(sql = %query, params = params.len(), "Running PostgreSQL query");

        client
            .query(query, params)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))
    }

    /// Get the connection string (without credentials)
    pub fn connection_string_safe(&self) -> String {
        self.safe_dsn.clone()
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

/// Rebuild the DSN from parsed hosts, ports and database name
fn redacted_dsn(config: &tokio_postgres::Config) -> String {
    let ports = config.get_ports();
    let hosts: Vec<String> = config
        .get_hosts()
        .iter()
        .enumerate()
        .map(|(i, host)| {
            let host = match host {
                Host::Tcp(name) => name.clone(),
                #[cfg(unix)]
                Host::Unix(path) => path.display().to_string(),
            };
            match ports.get(i).or_else(|| ports.first()) {
                Some(port) => format!("{host}:{port}"),
                None => host,
            }
        })
        .collect();

    format!(
        "postgresql://***@{}/{}",
        hosts.join(","),
        config.get_dbname().unwrap_or_default()
    )
}

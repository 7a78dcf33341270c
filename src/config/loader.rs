//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CadreConfig, LineTerminator, PostgreSQLConfig, StoreTarget};
use super::secret::secret_string;
use crate::domain::errors::CadreError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CadreConfig
/// 4. Applies environment variable overrides (CADRE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cadre::config::loader::load_config;
///
/// let config = load_config("cadre.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CadreConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CadreError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CadreError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    tracing::debug!(
        path = %path.display(),
        store_target = ?config.store_target,
        "Configuration loaded"
    );

    Ok(config)
}

/// Parses configuration text: substitution, TOML, overrides, validation
///
/// # Errors
///
/// Returns an error under the same conditions as [`load_config`], minus
/// file access.
pub fn parse_config(contents: &str) -> Result<CadreConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CadreConfig = toml::from_str(&contents)
        .map_err(|e| CadreError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CadreError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CadreError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(CadreError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Reads and parses `name`; an unparsable value is a configuration error
fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|e| {
            CadreError::Configuration(format!("Invalid value '{val}' for {name}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using the CADRE_* prefix
///
/// Environment variables follow the pattern `CADRE_<SECTION>_<KEY>`, for
/// example `CADRE_EXPORT_MAX_CONCURRENCY` or `CADRE_POSTGRESQL_CONNECTION_STRING`.
fn apply_env_overrides(config: &mut CadreConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CADRE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CADRE_STORE_TARGET") {
        config.store_target = match val.to_ascii_lowercase().as_str() {
            "memory" => StoreTarget::Memory,
            "postgresql" => StoreTarget::PostgreSQL,
            other => {
                return Err(CadreError::Configuration(format!(
                    "Invalid CADRE_STORE_TARGET '{other}'. Must be one of: memory, postgresql"
                )))
            }
        };
    }

    // Memory store overrides
    if let Ok(val) = std::env::var("CADRE_MEMORY_FIXTURE_PATH") {
        config.memory = Some(super::schema::MemoryConfig {
            fixture_path: val.into(),
        });
    }

    // PostgreSQL overrides; a connection string alone is enough to create the section
    if let Ok(val) = std::env::var("CADRE_POSTGRESQL_CONNECTION_STRING") {
        let secret = secret_string(val);
        match config.postgresql {
            Some(ref mut pg) => pg.connection_string = secret,
            None => config.postgresql = Some(PostgreSQLConfig::from_connection_string(secret)),
        }
    }
    if let Some(ref mut pg) = config.postgresql {
        if let Some(max) = env_parse("CADRE_POSTGRESQL_MAX_CONNECTIONS")? {
            pg.max_connections = max;
        }
        if let Some(secs) = env_parse("CADRE_POSTGRESQL_CONNECTION_TIMEOUT_SECONDS")? {
            pg.connection_timeout_seconds = secs;
        }
        if let Some(secs) = env_parse("CADRE_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS")? {
            pg.statement_timeout_seconds = secs;
        }
    }

    // Export overrides
    if let Some(max) = env_parse("CADRE_EXPORT_MAX_CONCURRENCY")? {
        config.export.max_concurrency = max;
    }
    if let Ok(val) = std::env::var("CADRE_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val.into();
    }
    if let Some(delimiter) = env_parse("CADRE_EXPORT_DELIMITER")? {
        config.export.delimiter = delimiter;
    }
    if let Ok(val) = std::env::var("CADRE_EXPORT_LINE_TERMINATOR") {
        config.export.line_terminator = match val.to_ascii_lowercase().as_str() {
            "crlf" => LineTerminator::Crlf,
            "lf" => LineTerminator::Lf,
            other => {
                return Err(CadreError::Configuration(format!(
                    "Invalid CADRE_EXPORT_LINE_TERMINATOR '{other}'. Must be one of: crlf, lf"
                )))
            }
        };
    }
    if let Some(bom) = env_parse("CADRE_EXPORT_UTF8_BOM")? {
        config.export.utf8_bom = bom;
    }

    // Logging overrides
    if let Some(enabled) = env_parse("CADRE_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Ok(val) = std::env::var("CADRE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CADRE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX`.

use cadre::config::{load_config, LineTerminator, StoreTarget};
use cadre::core::export::ExportSettings;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for name in [
        "CADRE_APPLICATION_LOG_LEVEL",
        "CADRE_STORE_TARGET",
        "CADRE_EXPORT_MAX_CONCURRENCY",
        "CADRE_EXPORT_DELIMITER",
        "CADRE_EXPORT_LINE_TERMINATOR",
        "CADRE_POSTGRESQL_CONNECTION_STRING",
        "CADRE_POSTGRESQL_MAX_CONNECTIONS",
        "TEST_CADRE_PG_PASSWORD",
    ] {
        std::env::remove_var(name);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
store_target = "postgresql"

[application]
log_level = "debug"

[postgresql]
connection_string = "postgresql://cadre:pw@db:5432/cadre"
max_connections = 20
connection_timeout_seconds = 5
statement_timeout_seconds = 120

[export]
max_concurrency = 8
output_dir = "/tmp/cadre-exports"
delimiter = ";"
line_terminator = "lf"
utf8_bom = true

[logging]
local_enabled = false
local_path = "/tmp/cadre"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.store_target, StoreTarget::PostgreSQL);

    let pg = config.postgresql.as_ref().unwrap();
    assert_eq!(pg.max_connections, 20);
    assert_eq!(pg.connection_timeout_seconds, 5);
    assert_eq!(pg.statement_timeout_seconds, 120);

    assert_eq!(config.export.max_concurrency, 8);
    assert_eq!(config.export.delimiter, ';');
    assert_eq!(config.export.line_terminator, LineTerminator::Lf);
    assert!(config.export.utf8_bom);

    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let settings = ExportSettings::from_config(&config.export).unwrap();
    assert_eq!(settings.max_concurrency, 8);
    assert_eq!(settings.encoder.delimiter, b';');
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[memory]\nfixture_path = \"fixtures/acme.json\"\n");
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.store_target, StoreTarget::Memory);
    assert_eq!(config.export.max_concurrency, 4);
    assert_eq!(config.export.delimiter, ',');
    assert_eq!(config.export.line_terminator, LineTerminator::Crlf);
    assert!(!config.export.utf8_bom);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CADRE_PG_PASSWORD", "s3cret");

    let temp_file = write_config(
        r#"
store_target = "postgresql"

[postgresql]
connection_string = "postgresql://cadre:${TEST_CADRE_PG_PASSWORD}@db:5432/cadre"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    let pg = config.postgresql.unwrap();
    let connection_string: &str = pg.connection_string.expose_secret().as_ref();
    assert_eq!(connection_string, "postgresql://cadre:s3cret@db:5432/cadre");

    cleanup_env_vars();
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CADRE_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("CADRE_EXPORT_MAX_CONCURRENCY", "2");
    std::env::set_var("CADRE_EXPORT_LINE_TERMINATOR", "LF");
    std::env::set_var("CADRE_STORE_TARGET", "postgresql");
    std::env::set_var(
        "CADRE_POSTGRESQL_CONNECTION_STRING",
        "postgresql://cadre:pw@override:5432/cadre",
    );
    std::env::set_var("CADRE_POSTGRESQL_MAX_CONNECTIONS", "3");

    let temp_file = write_config("[memory]\nfixture_path = \"fixtures/acme.json\"\n");
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.export.max_concurrency, 2);
    assert_eq!(config.export.line_terminator, LineTerminator::Lf);
    assert_eq!(config.store_target, StoreTarget::PostgreSQL);
    assert_eq!(config.postgresql.unwrap().max_connections, 3);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_is_a_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CADRE_EXPORT_MAX_CONCURRENCY", "many");

    let temp_file = write_config("[memory]\nfixture_path = \"fixtures/acme.json\"\n");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("CADRE_EXPORT_MAX_CONCURRENCY"));
    assert_eq!(err.exit_code(), 2);

    cleanup_env_vars();
}

#[test]
fn test_validation_rejects_bad_export_settings() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for export in [
        "max_concurrency = 0",
        "max_concurrency = 64",
        "delimiter = \"\\\"\"",
        "delimiter = \"é\"",
    ] {
        let temp_file = write_config(&format!(
            "[memory]\nfixture_path = \"f.json\"\n\n[export]\n{export}\n"
        ));
        assert!(
            load_config(temp_file.path()).is_err(),
            "expected '{export}' to be rejected"
        );
    }
}

#[test]
fn test_postgresql_target_requires_section() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("store_target = \"postgresql\"\n");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("postgresql configuration is required"));
}

#[test]
fn test_connection_string_override_creates_section_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var(
        "CADRE_POSTGRESQL_CONNECTION_STRING",
        "postgresql://cadre:secret@db:5432/cadre",
    );

    let temp_file = write_config("store_target = \"postgresql\"\n");
    let config = load_config(temp_file.path()).unwrap();
    let pg = config.postgresql.unwrap();

    let conn_str: &str = pg.connection_string.expose_secret().as_ref();
    assert_eq!(conn_str, "postgresql://cadre:secret@db:5432/cadre");
    assert_eq!(pg.max_connections, 10);
    assert_eq!(pg.connection_timeout_seconds, 30);
    assert_eq!(pg.statement_timeout_seconds, 60);

    cleanup_env_vars();
}

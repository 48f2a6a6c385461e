/*!
 * Tests for database configuration functionality
 */

use std::collections::HashMap;

use anyhow::Result;
use librarium::app_config::{DatabaseConfig, Engine, LogLevel, IN_MEMORY};
use log::LevelFilter;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = DatabaseConfig::default();

    assert_eq!(config.engine, Engine::Sqlite);
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, None);
    assert_eq!(config.database, "Library_Management_System");
    assert!(config.username.is_empty());
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = DatabaseConfig::default();
    assert!(config.validate().is_ok());

    // Network engines need a login
    config.engine = Engine::Postgres;
    assert!(config.validate().is_err());
    config.username = "login1".to_string();
    assert!(config.validate().is_ok());

    // And a host
    config.host = " ".to_string();
    assert!(config.validate().is_err());
    config.host = "db.internal".to_string();

    // Port zero is never valid
    config.port = Some(0);
    assert!(config.validate().is_err());
    config.port = None;

    // Empty database name
    config.database = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_effectivePort_shouldFallBackToEngineDefault() {
    let mut config = DatabaseConfig::default();
    assert_eq!(config.effective_port(), None);

    config.engine = Engine::SqlServer;
    assert_eq!(config.effective_port(), Some(1433));

    config.port = Some(14330);
    assert_eq!(config.effective_port(), Some(14330));
}

#[test]
fn test_applyOverrides_shouldReplaceGivenFieldsOnly() -> Result<()> {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("LIBRARIUM_DB_ENGINE", "mysql"),
        ("LIBRARIUM_DB_PORT", "3307"),
        ("LIBRARIUM_DB_USER", "librarian"),
        ("LIBRARIUM_DB_PASSWORD", "secret"),
    ]);

    let mut config = DatabaseConfig::default();
    config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()))?;

    assert_eq!(config.engine, Engine::MySql);
    assert_eq!(config.port, Some(3307));
    assert_eq!(config.username, "librarian");
    assert_eq!(config.password, "secret");
    assert_eq!(config.host, "localhost");
    assert_eq!(
        config.connection_url()?,
        "mysql://localhost:3307/Library_Management_System"
    );
    Ok(())
}

#[test]
fn test_applyOverrides_withBadPort_shouldFail() {
    let mut config = DatabaseConfig::default();
    let result = config.apply_overrides(|name| {
        (name == "LIBRARIUM_DB_PORT").then(|| "not-a-port".to_string())
    });
    assert!(result.is_err());
}

#[test]
fn test_saveAndLoad_shouldRoundTripThroughJson() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("database.json");

    let mut config = DatabaseConfig::sqlite(IN_MEMORY);
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = DatabaseConfig::load(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_load_withPartialJson_shouldApplyDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("database.json");
    std::fs::write(&path, r#"{ "engine": "postgres", "username": "login1" }"#)?;

    let config = DatabaseConfig::load(&path)?;
    assert_eq!(config.engine, Engine::Postgres);
    assert_eq!(config.host, "localhost");
    assert_eq!(
        config.connection_url()?,
        "postgresql://localhost:5432/Library_Management_System"
    );

    let target = config.target()?;
    let credentials = target.credentials.expect("network engines carry credentials");
    assert_eq!(credentials.username, "login1");
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldFail() {
    assert!(DatabaseConfig::load("/nonexistent/database.json").is_err());
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}

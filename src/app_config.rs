use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fmt;
use std::path::{Path, PathBuf};

/// Database configuration module
/// This module handles the connection settings including loading,
/// validating and saving them, and turns them into a gateway target.
/// Represents the database configuration
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Database engine
    #[serde(default)]
    pub engine: Engine,

    /// Server host name (network engines only)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port, engine default when absent
    #[serde(default)]
    pub port: Option<u16>,

    /// Database name, or for SQLite a file path or `:memory:`
    #[serde(default = "default_database_name")]
    pub database: String,

    /// Login name
    #[serde(default)]
    pub username: String,

    /// Login password
    #[serde(default)]
    pub password: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Database engine type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    // @engine: embedded SQLite, the only engine with a bundled driver
    #[default]
    Sqlite,
    // @engine: PostgreSQL
    Postgres,
    // @engine: MySQL
    MySql,
    // @engine: Microsoft SQL Server
    SqlServer,
}

impl Engine {
    // @returns: Capitalized engine name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Sqlite => "SQLite",
            Self::Postgres => "PostgreSQL",
            Self::MySql => "MySQL",
            Self::SqlServer => "SQL Server",
        }
    }

    // @returns: Lowercase engine identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Sqlite => "sqlite".to_string(),
            Self::Postgres => "postgres".to_string(),
            Self::MySql => "mysql".to_string(),
            Self::SqlServer => "sqlserver".to_string(),
        }
    }

    // @returns: Port the engine listens on by default
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::Sqlite => None,
            Self::Postgres => Some(5432),
            Self::MySql => Some(3306),
            Self::SqlServer => Some(1433),
        }
    }

    // @returns: Whether the engine is reached over the network
    pub fn is_networked(&self) -> bool {
        !matches!(self, Self::Sqlite)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for Engine {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" => Ok(Self::MySql),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            _ => Err(anyhow!("Invalid engine type: {}", s)),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Login credentials for network engines
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Where a gateway connects: engine, connection URL and login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub engine: Engine,
    pub url: String,
    pub credentials: Option<Credentials>,
}

impl Target {
    /// SQLite target for a database file
    pub fn sqlite<P: AsRef<Path>>(path: P) -> Self {
        Self {
            engine: Engine::Sqlite,
            url: path.as_ref().to_string_lossy().into_owned(),
            credentials: None,
        }
    }

    /// Private in-memory SQLite target
    pub fn in_memory() -> Self {
        Self::sqlite(IN_MEMORY)
    }

    /// Two targets name the same store when engine and URL match
    pub fn same_store(&self, other: &Target) -> bool {
        self.engine == other.engine && self.url == other.url
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.engine, self.url)
    }
}

/// SQLite name of a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Directory under the user's data directory holding SQLite databases
const DEFAULT_DB_DIRNAME: &str = "librarium";

/// Prefix of the environment variables read by `apply_env_overrides`
pub const ENV_PREFIX: &str = "LIBRARIUM_DB_";

fn default_host() -> String {
    "localhost".to_string()
}

fn default_database_name() -> String {
    "Library_Management_System".to_string()
}

/// Default directory for SQLite database files
pub fn default_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;

    Ok(base_dir.join(DEFAULT_DB_DIRNAME))
}

impl DatabaseConfig {
    /// Configuration for a SQLite database file or `:memory:`
    pub fn sqlite(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Overlay settings from `LIBRARIUM_DB_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay settings from any variable source
    ///
    /// `lookup` receives the full variable name, e.g. `LIBRARIUM_DB_HOST`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{}{}", ENV_PREFIX, suffix));

        if let Some(engine) = var("ENGINE") {
            self.engine = engine.parse()?;
        }
        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("Invalid port: {}", port))?;
            self.port = Some(port);
        }
        if let Some(database) = var("NAME") {
            self.database = database;
        }
        if let Some(username) = var("USER") {
            self.username = username;
        }
        if let Some(password) = var("PASSWORD") {
            self.password = password;
        }

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(anyhow!("Database name is required"));
        }

        if self.port == Some(0) {
            return Err(anyhow!("Port must be non-zero"));
        }

        if self.engine.is_networked() {
            if self.host.trim().is_empty() {
                return Err(anyhow!("Host is required for {}", self.engine.display_name()));
            }
            if self.username.trim().is_empty() {
                return Err(anyhow!(
                    "Username is required for {}",
                    self.engine.display_name()
                ));
            }
        }

        Ok(())
    }

    /// Effective port: the explicit one or the engine default
    pub fn effective_port(&self) -> Option<u16> {
        self.port.or_else(|| self.engine.default_port())
    }

    /// Connection URL for the configured engine
    pub fn connection_url(&self) -> Result<String> {
        let port = self.effective_port().unwrap_or_default();
        let url = match self.engine {
            Engine::Sqlite => self.sqlite_path()?.to_string_lossy().into_owned(),
            Engine::Postgres => format!("postgresql://{}:{}/{}", self.host, port, self.database),
            Engine::MySql => format!("mysql://{}:{}/{}", self.host, port, self.database),
            Engine::SqlServer => format!(
                "sqlserver://{}:{};databaseName={}",
                self.host, port, self.database
            ),
        };
        Ok(url)
    }

    /// Gateway target described by this configuration
    pub fn target(&self) -> Result<Target> {
        self.validate()?;

        let credentials = if self.engine.is_networked() {
            Some(Credentials {
                username: self.username.clone(),
                password: self.password.clone(),
            })
        } else {
            None
        };

        Ok(Target {
            engine: self.engine,
            url: self.connection_url()?,
            credentials,
        })
    }

    // A bare name lives in the data directory; anything with a directory part is used as given
    fn sqlite_path(&self) -> Result<PathBuf> {
        if self.database == IN_MEMORY {
            return Ok(PathBuf::from(IN_MEMORY));
        }

        let path = Path::new(&self.database);
        let has_dir = path
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty());

        if path.is_absolute() || has_dir {
            Ok(path.to_path_buf())
        } else if path.extension().is_some() {
            Ok(default_data_dir()?.join(path))
        } else {
            Ok(default_data_dir()?.join(format!("{}.db", self.database)))
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("engine", &self.engine)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Default implementation for DatabaseConfig
impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            engine: Engine::default(),
            host: default_host(),
            port: None,
            database: default_database_name(),
            username: String::new(),
            password: String::new(),
            log_level: LogLevel::default(),
        }
    }
}

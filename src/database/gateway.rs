/*!
 * Connection gateway.
 *
 * A `Gateway` owns at most one open connection, bound to a single target.
 * The connection is opened lazily by the first query or update and stays
 * open until `close()` is called or the gateway is dropped. Statements are
 * prepared per call and released before the call returns.
 */

use log::{debug, error, info};
use rusqlite::{Connection, OpenFlags, Row, ToSql};

use super::cursor::RowCursor;
use crate::app_config::{DatabaseConfig, Engine, Target, IN_MEMORY};
use crate::errors::LibraryError;

/// Single-connection access point to the backing store
pub struct Gateway {
    /// Target this gateway reads and writes by default
    target: Target,
    /// Open connection and the target it was opened for
    connection: Option<(Target, Connection)>,
}

impl Gateway {
    /// Create a closed gateway bound to `target`
    pub fn new(target: Target) -> Self {
        Self {
            target,
            connection: None,
        }
    }

    /// Create a closed gateway from configuration
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, LibraryError> {
        let target = config
            .target()
            .map_err(|e| LibraryError::Config(format!("{:#}", e)))?;
        Ok(Self::new(target))
    }

    /// Create a closed gateway for a private in-memory database
    pub fn in_memory() -> Self {
        Self::new(Target::in_memory())
    }

    /// Target the gateway is bound to
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Whether a connection is currently open
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Open a connection to `target` unless one is already open
    ///
    /// Reusing the open connection requires the same target; asking for a
    /// different one while connected fails with `TargetMismatch`.
    pub fn connect(&mut self, target: &Target) -> Result<(), LibraryError> {
        if let Some((connected, _)) = &self.connection {
            if connected.same_store(target) {
                return Ok(());
            }
            return Err(LibraryError::TargetMismatch {
                connected: connected.to_string(),
                requested: target.to_string(),
            });
        }

        let connection = open(target)?;
        info!("Opened {} connection to {}", target.engine.display_name(), target.url);
        self.connection = Some((target.clone(), connection));
        Ok(())
    }

    /// Run a read-only query against the bound target
    pub fn execute_query(
        &mut self,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<RowCursor, LibraryError> {
        let target = self.target.clone();
        self.execute_query_at(&target, sql, params)
    }

    /// Run a read-only query against `target`
    pub fn execute_query_at(
        &mut self,
        target: &Target,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<RowCursor, LibraryError> {
        let conn = self.ensure_connected(target)?;

        debug!("Preparing query: {}", sql);
        let mut stmt = conn.prepare(sql)?;
        if !stmt.readonly() {
            return Err(LibraryError::NotReadOnly(sql.to_string()));
        }

        let columns = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let rows = stmt.query(params)?;
        let cursor = RowCursor::drain(columns, rows)?;

        debug!("Query returned {} rows", cursor.len());
        Ok(cursor)
    }

    /// Run an INSERT, UPDATE or DELETE against the bound target
    pub fn execute_update(&mut self, sql: &str, params: &[&dyn ToSql]) -> Result<usize, LibraryError> {
        let target = self.target.clone();
        self.execute_update_at(&target, sql, params)
    }

    /// Run an INSERT, UPDATE or DELETE against `target`, returning the affected-row count
    pub fn execute_update_at(
        &mut self,
        target: &Target,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<usize, LibraryError> {
        let conn = self.ensure_connected(target)?;

        debug!("Preparing update: {}", sql);
        let mut stmt = conn.prepare(sql)?;
        let affected = stmt.execute(params)?;

        debug!("Update affected {} rows", affected);
        Ok(affected)
    }

    /// Run a read against the bound target, mapping every row through `f`
    pub fn query_map<T, F>(
        &mut self,
        sql: &str,
        params: &[&dyn ToSql],
        f: F,
    ) -> Result<Vec<T>, LibraryError>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let target = self.target.clone();
        let conn = self.ensure_connected(&target)?;

        debug!("Preparing query: {}", sql);
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, f)?;
        let records = rows.collect::<rusqlite::Result<Vec<T>>>()?;

        Ok(records)
    }

    /// Run parameterless, possibly multi-statement SQL against the bound target
    pub fn execute_batch(&mut self, sql: &str) -> Result<(), LibraryError> {
        let target = self.target.clone();
        let conn = self.ensure_connected(&target)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Id the store generated for the last inserted row, if connected
    pub fn last_insert_id(&self) -> Option<i64> {
        self.connection
            .as_ref()
            .map(|(_, conn)| conn.last_insert_rowid())
    }

    /// Close the open connection
    ///
    /// Failures are logged and swallowed. The next operation reconnects.
    pub fn close(&mut self) {
        let Some((target, connection)) = self.connection.take() else {
            return;
        };

        match connection.close() {
            Ok(()) => info!("Closed connection to {}", target.url),
            Err((_, e)) => error!("Failed to close connection to {}: {}", target.url, e),
        }
    }

    fn ensure_connected(&mut self, target: &Target) -> Result<&Connection, LibraryError> {
        self.connect(target)?;
        match &self.connection {
            Some((_, conn)) => Ok(conn),
            None => Err(LibraryError::Connection(format!(
                "no open connection to {}",
                target
            ))),
        }
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("target", &self.target)
            .field("connected", &self.is_connected())
            .finish()
    }
}

fn open(target: &Target) -> Result<Connection, LibraryError> {
    if target.engine != Engine::Sqlite {
        return Err(LibraryError::UnsupportedEngine(target.engine));
    }

    let result = if target.url == IN_MEMORY {
        debug!("Creating in-memory database");
        Connection::open_in_memory()
    } else {
        // Missing parent directories are created like a first run of the application would
        if let Some(parent) = std::path::Path::new(&target.url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LibraryError::Connection(format!(
                        "Failed to create database directory {:?}: {}",
                        parent, e
                    ))
                })?;
            }
        }
        Connection::open_with_flags(
            &target.url,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    };

    let conn = result
        .map_err(|e| LibraryError::Connection(format!("Failed to open {}: {}", target.url, e)))?;

    // The bundled SQLite turns foreign keys on by default; references stay unchecked here
    conn.execute_batch("PRAGMA foreign_keys = OFF")
        .map_err(|e| LibraryError::Connection(format!("Failed to configure {}: {}", target.url, e)))?;

    Ok(conn)
}

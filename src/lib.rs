/*!
 * # librarium - data access for a library management application
 *
 * Models the entities of a small library (authors, books, members and
 * borrowing records) and persists them to a relational store through
 * parameterized SQL.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Connection settings (engine, host, port, database, credentials)
 * - `database`: Store access:
 *   - `database::gateway`: Single-connection gateway with lazy connect and explicit close
 *   - `database::cursor`: Scrollable query results
 *   - `database::schema`: Table bootstrap for an empty SQLite store
 * - `models`: Entity records with insert, update, delete and finders
 * - `datetime_utils`: ISO-8601 and custom timestamp patterns
 * - `validation`: Optional field checks run before persisting
 * - `errors`: Error type shared by every module
 *
 * ## Example
 *
 * ```no_run
 * use librarium::{Author, DatabaseConfig, Gateway};
 * use librarium::database::schema;
 *
 * # fn main() -> Result<(), Box<dyn std::error::Error>> {
 * let config = DatabaseConfig::sqlite("library.db");
 * let mut gateway = Gateway::from_config(&config)?;
 * schema::create_tables(&mut gateway)?;
 *
 * let mut author = Author::new("Jane", "Austen");
 * let inserted = author.add_to_database(&mut gateway)?;
 * assert_eq!(inserted, 1);
 *
 * gateway.close();
 * # Ok(())
 * # }
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod datetime_utils;
pub mod errors;
pub mod models;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::{DatabaseConfig, Engine, Target};
pub use database::{Gateway, RowCursor};
pub use errors::{ErrorKind, LibraryError};
pub use models::{Author, Book, Borrow, Record, User, UNASSIGNED_ID};

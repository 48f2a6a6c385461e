/*!
 * Database access for the library store.
 *
 * - `gateway`: the single-connection gateway every entity goes through
 * - `cursor`: scrollable result of a query
 * - `schema`: table bootstrap for an empty SQLite store
 */

pub mod cursor;
pub mod gateway;
pub mod schema;

// Re-export main types
pub use cursor::RowCursor;
pub use gateway::Gateway;

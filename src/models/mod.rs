/*!
 * Entity records of the library store.
 *
 * Each record mirrors one table row and persists itself through a
 * [`Gateway`]: `add_to_database`, `save_changes` and `delete` return the
 * affected-row count. Records built with `new` carry [`UNASSIGNED_ID`] and no
 * creation timestamp until their insert succeeds.
 */

pub mod author;
pub mod book;
pub mod borrow;
pub mod user;

use rusqlite::Row;

use crate::database::Gateway;
use crate::errors::LibraryError;

// Re-export main types
pub use author::Author;
pub use book::Book;
pub use borrow::Borrow;
pub use user::User;

/// Id of a record the store has not assigned an id to yet
pub const UNASSIGNED_ID: i64 = -1;

/// Read access shared by all entity records
pub trait Record: Sized {
    /// Table name
    const TABLE: &'static str;
    /// Primary key column
    const ID_COLUMN: &'static str;
    /// Select list, in the order `from_row` reads it
    const COLUMNS: &'static str;

    /// Build a record from a row selected with `COLUMNS`
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Load the record with the given id
    fn find_by_id(gateway: &mut Gateway, id: i64) -> Result<Option<Self>, LibraryError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            Self::COLUMNS,
            Self::TABLE,
            Self::ID_COLUMN
        );
        let mut records = gateway.query_map(&sql, &[&id], Self::from_row)?;
        Ok(records.pop())
    }

    /// Load every record, ordered by id
    fn find_all(gateway: &mut Gateway) -> Result<Vec<Self>, LibraryError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            Self::COLUMNS,
            Self::TABLE,
            Self::ID_COLUMN
        );
        gateway.query_map(&sql, &[], Self::from_row)
    }
}

// A single inserted row means the connection's last rowid is ours.
// Inserts never bind the id column, so a repeated insert moves the record to the new row.
pub(crate) fn adopt_generated_id(id: &mut i64, gateway: &Gateway, affected: usize) {
    if affected == 1 {
        if let Some(generated) = gateway.last_insert_id() {
            *id = generated;
        }
    }
}

/*!
 * Author records.
 */

use chrono::{DateTime, FixedOffset};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{adopt_generated_id, Record, UNASSIGNED_ID};
use crate::database::Gateway;
use crate::datetime_utils::{self, format_optional};
use crate::errors::LibraryError;

const INSERT_SQL: &str = "INSERT INTO author (first_name, last_name, date_added) VALUES (?, ?, ?)";

const UPDATE_SQL: &str = "UPDATE author SET first_name = ?, last_name = ? WHERE author_id = ?";

const DELETE_SQL: &str = "DELETE FROM author WHERE author_id = ?";

/// An author of one or more books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Store-assigned id, `UNASSIGNED_ID` until inserted
    author_id: i64,
    /// First name
    first_name: String,
    /// Last name
    last_name: String,
    /// When the author was inserted
    date_added: Option<DateTime<FixedOffset>>,
}

impl Author {
    /// Stage a new author for insertion
    ///
    /// The id stays `UNASSIGNED_ID` and `date_added` stays empty until
    /// `add_to_database` succeeds.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::from_parts(UNASSIGNED_ID, first_name, last_name, None)
    }

    /// Build an author from stored values
    pub fn from_parts(
        author_id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_added: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            author_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_added,
        }
    }

    pub fn author_id(&self) -> i64 {
        self.author_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    /// When the author was inserted, `None` if not inserted yet
    pub fn date_added(&self) -> Option<DateTime<FixedOffset>> {
        self.date_added
    }

    /// Insert the author, stamping `date_added` with the current time
    ///
    /// On success the author adopts the id generated by the store. Calling it
    /// again on a stored author inserts a second row, which the author then
    /// tracks with its new id and stamp. Returns the number of rows affected.
    pub fn add_to_database(&mut self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        let date_added = datetime_utils::now();
        let affected = gateway.execute_update(
            INSERT_SQL,
            &[&self.first_name, &self.last_name, &date_added],
        )?;
        adopt_generated_id(&mut self.author_id, gateway, affected);
        self.date_added = Some(date_added);

        Ok(affected)
    }

    /// Persist the names
    ///
    /// Returns the number of rows affected, 0 when the id is not stored.
    pub fn save_changes(&self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        gateway.execute_update(
            UPDATE_SQL,
            &[&self.first_name, &self.last_name, &self.author_id],
        )
    }

    /// Delete the author
    ///
    /// Returns the number of rows affected, 0 when the id is not stored.
    pub fn delete(&self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        gateway.execute_update(DELETE_SQL, &[&self.author_id])
    }
}

impl Record for Author {
    const TABLE: &'static str = "author";
    const ID_COLUMN: &'static str = "author_id";
    const COLUMNS: &'static str = "author_id, first_name, last_name, date_added";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            author_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            date_added: row.get(3)?,
        })
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Author{{author_id = {}, first_name = '{}', last_name = '{}', date_added = {}}}",
            self.author_id,
            self.first_name,
            self.last_name,
            format_optional(self.date_added.as_ref())
        )
    }
}

/*!
 * Library members.
 */

use chrono::{DateTime, FixedOffset};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{adopt_generated_id, Record, UNASSIGNED_ID};
use crate::database::Gateway;
use crate::datetime_utils::{self, format_optional};
use crate::errors::LibraryError;

const INSERT_SQL: &str =
    "INSERT INTO user (first_name, last_name, date_added, booking_record) VALUES (?, ?, ?, ?)";

const UPDATE_SQL: &str =
    "UPDATE user SET first_name = ?, last_name = ?, booking_record = ? WHERE user_id = ?";

const DELETE_SQL: &str = "DELETE FROM user WHERE user_id = ?";

/// A library member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    user_id: i64,
    first_name: String,
    last_name: String,
    date_added: Option<DateTime<FixedOffset>>,
    /// `true` while the member's borrowing record is clean
    booking_record: bool,
}

impl User {
    /// Stage a new member with a clean borrowing record
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::from_parts(UNASSIGNED_ID, first_name, last_name, None, true)
    }

    pub fn from_parts(
        user_id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_added: Option<DateTime<FixedOffset>>,
        booking_record: bool,
    ) -> Self {
        Self {
            user_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_added,
            booking_record,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
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

    pub fn date_added(&self) -> Option<DateTime<FixedOffset>> {
        self.date_added
    }

    /// Whether the borrowing record is clean
    pub fn booking_record(&self) -> bool {
        self.booking_record
    }

    pub fn set_booking_record(&mut self, booking_record: bool) {
        self.booking_record = booking_record;
    }

    /// Insert the member, stamping `date_added` with the current time
    pub fn add_to_database(&mut self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        let date_added = datetime_utils::now();
        let affected = gateway.execute_update(
            INSERT_SQL,
            &[
                &self.first_name,
                &self.last_name,
                &date_added,
                &self.booking_record,
            ],
        )?;
        adopt_generated_id(&mut self.user_id, gateway, affected);
        self.date_added = Some(date_added);

        Ok(affected)
    }

    /// Persist names and borrowing record
    pub fn save_changes(&self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        gateway.execute_update(
            UPDATE_SQL,
            &[
                &self.first_name,
                &self.last_name,
                &self.booking_record,
                &self.user_id,
            ],
        )
    }

    pub fn delete(&self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        gateway.execute_update(DELETE_SQL, &[&self.user_id])
    }
}

impl Record for User {
    const TABLE: &'static str = "user";
    const ID_COLUMN: &'static str = "user_id";
    const COLUMNS: &'static str = "user_id, first_name, last_name, date_added, booking_record";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            user_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            date_added: row.get(3)?,
            booking_record: row.get(4)?,
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User{{user_id = {}, first_name = '{}', last_name = '{}', date_added = {}, booking_record = {}}}",
            self.user_id,
            self.first_name,
            self.last_name,
            format_optional(self.date_added.as_ref()),
            if self.booking_record { "Clean" } else { "Not Clean" }
        )
    }
}

/*!
 * Borrowing records: one member borrowing one book.
 *
 * `borrowing_date` is stamped on insert and `actual_return_date` by
 * `return_book`; neither has a setter.
 */

use chrono::{DateTime, FixedOffset};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{adopt_generated_id, Record, UNASSIGNED_ID};
use crate::database::Gateway;
use crate::datetime_utils::{self, format_custom3, format_optional};
use crate::errors::LibraryError;

const INSERT_SQL: &str = "INSERT INTO borrow (book_id, user_id, borrowing_date, expected_return_date) \
     VALUES (?, ?, ?, ?)";

const UPDATE_SQL: &str =
    "UPDATE borrow SET book_id = ?, user_id = ?, expected_return_date = ? WHERE borrowing_id = ?";

const RETURN_SQL: &str = "UPDATE borrow SET actual_return_date = ? WHERE borrowing_id = ?";

const DELETE_SQL: &str = "DELETE FROM borrow WHERE borrowing_id = ?";

/// A member borrowing a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrow {
    borrowing_id: i64,
    book_id: i64,
    user_id: i64,
    /// Set when the borrow is inserted
    borrowing_date: Option<DateTime<FixedOffset>>,
    expected_return_date: DateTime<FixedOffset>,
    /// Set when the book comes back
    actual_return_date: Option<DateTime<FixedOffset>>,
}

impl Borrow {
    /// Stage a new borrow for insertion
    pub fn new(book_id: i64, user_id: i64, expected_return_date: DateTime<FixedOffset>) -> Self {
        Self::from_parts(
            UNASSIGNED_ID,
            book_id,
            user_id,
            None,
            expected_return_date,
            None,
        )
    }

    /// Build a borrow from stored values
    pub fn from_parts(
        borrowing_id: i64,
        book_id: i64,
        user_id: i64,
        borrowing_date: Option<DateTime<FixedOffset>>,
        expected_return_date: DateTime<FixedOffset>,
        actual_return_date: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            borrowing_id,
            book_id,
            user_id,
            borrowing_date,
            expected_return_date,
            actual_return_date,
        }
    }

    pub fn borrowing_id(&self) -> i64 {
        self.borrowing_id
    }

    pub fn book_id(&self) -> i64 {
        self.book_id
    }

    pub fn set_book_id(&mut self, book_id: i64) {
        self.book_id = book_id;
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn set_user_id(&mut self, user_id: i64) {
        self.user_id = user_id;
    }

    pub fn borrowing_date(&self) -> Option<DateTime<FixedOffset>> {
        self.borrowing_date
    }

    pub fn expected_return_date(&self) -> DateTime<FixedOffset> {
        self.expected_return_date
    }

    pub fn set_expected_return_date(&mut self, expected_return_date: DateTime<FixedOffset>) {
        self.expected_return_date = expected_return_date;
    }

    pub fn actual_return_date(&self) -> Option<DateTime<FixedOffset>> {
        self.actual_return_date
    }

    /// Whether the book has been returned
    pub fn is_returned(&self) -> bool {
        self.actual_return_date.is_some()
    }

    /// Insert the borrow, stamping `borrowing_date` with the current time
    pub fn add_to_database(&mut self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        let borrowing_date = datetime_utils::now();
        let affected = gateway.execute_update(
            INSERT_SQL,
            &[
                &self.book_id,
                &self.user_id,
                &borrowing_date,
                &self.expected_return_date,
            ],
        )?;
        adopt_generated_id(&mut self.borrowing_id, gateway, affected);
        self.borrowing_date = Some(borrowing_date);

        Ok(affected)
    }

    /// Mark the book as returned now and persist the return date
    ///
    /// Calling it again overwrites the earlier return date.
    pub fn return_book(&mut self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        let returned_at = datetime_utils::now();
        self.actual_return_date = Some(returned_at);

        gateway.execute_update(RETURN_SQL, &[&returned_at, &self.borrowing_id])
    }

    /// Persist book, member and expected return date
    pub fn save_changes(&self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        gateway.execute_update(
            UPDATE_SQL,
            &[
                &self.book_id,
                &self.user_id,
                &self.expected_return_date,
                &self.borrowing_id,
            ],
        )
    }

    pub fn delete(&self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        gateway.execute_update(DELETE_SQL, &[&self.borrowing_id])
    }

    /// Every borrow of the given member, ordered by id
    pub fn find_by_user(gateway: &mut Gateway, user_id: i64) -> Result<Vec<Self>, LibraryError> {
        let sql = format!(
            "SELECT {} FROM borrow WHERE user_id = ? ORDER BY borrowing_id",
            Self::COLUMNS
        );
        gateway.query_map(&sql, &[&user_id], Self::from_row)
    }

    /// Borrows whose book has not come back yet
    pub fn find_outstanding(gateway: &mut Gateway) -> Result<Vec<Self>, LibraryError> {
        let sql = format!(
            "SELECT {} FROM borrow WHERE actual_return_date IS NULL ORDER BY borrowing_id",
            Self::COLUMNS
        );
        gateway.query_map(&sql, &[], Self::from_row)
    }
}

impl Record for Borrow {
    const TABLE: &'static str = "borrow";
    const ID_COLUMN: &'static str = "borrowing_id";
    const COLUMNS: &'static str =
        "borrowing_id, book_id, user_id, borrowing_date, expected_return_date, actual_return_date";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            borrowing_id: row.get(0)?,
            book_id: row.get(1)?,
            user_id: row.get(2)?,
            borrowing_date: row.get(3)?,
            expected_return_date: row.get(4)?,
            actual_return_date: row.get(5)?,
        })
    }
}

impl fmt::Display for Borrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Borrow{{borrowing_id = {}, book_id = {}, user_id = {}, borrowing_date = {}, \
             expected_return_date = {}, actual_return_date = {}}}",
            self.borrowing_id,
            self.book_id,
            self.user_id,
            format_optional(self.borrowing_date.as_ref()),
            format_custom3(&self.expected_return_date),
            format_optional(self.actual_return_date.as_ref())
        )
    }
}

/*!
 * Book records.
 */

use chrono::{DateTime, FixedOffset};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{adopt_generated_id, Record, UNASSIGNED_ID};
use crate::database::Gateway;
use crate::datetime_utils::{self, format_optional};
use crate::errors::LibraryError;

const INSERT_SQL: &str = "INSERT INTO book (title, description, number_of_pages, date_added, genre, author_id) \
     VALUES (?, ?, ?, ?, ?, ?)";

const UPDATE_SQL: &str = "UPDATE book SET title = ?, description = ?, number_of_pages = ?, genre = ?, author_id = ? \
     WHERE book_id = ?";

const DELETE_SQL: &str = "DELETE FROM book WHERE book_id = ?";

/// A book in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    book_id: i64,
    title: String,
    description: String,
    number_of_pages: i32,
    date_added: Option<DateTime<FixedOffset>>,
    genre: String,
    /// Id of the author; not checked against the author table
    author_id: i64,
}

impl Book {
    /// Stage a new book for insertion
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        number_of_pages: i32,
        genre: impl Into<String>,
        author_id: i64,
    ) -> Self {
        Self::from_parts(
            UNASSIGNED_ID,
            title,
            description,
            number_of_pages,
            None,
            genre,
            author_id,
        )
    }

    /// Build a book from stored values
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        book_id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        number_of_pages: i32,
        date_added: Option<DateTime<FixedOffset>>,
        genre: impl Into<String>,
        author_id: i64,
    ) -> Self {
        Self {
            book_id,
            title: title.into(),
            description: description.into(),
            number_of_pages,
            date_added,
            genre: genre.into(),
            author_id,
        }
    }

    pub fn book_id(&self) -> i64 {
        self.book_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn number_of_pages(&self) -> i32 {
        self.number_of_pages
    }

    pub fn set_number_of_pages(&mut self, number_of_pages: i32) {
        self.number_of_pages = number_of_pages;
    }

    pub fn date_added(&self) -> Option<DateTime<FixedOffset>> {
        self.date_added
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.genre = genre.into();
    }

    pub fn author_id(&self) -> i64 {
        self.author_id
    }

    pub fn set_author_id(&mut self, author_id: i64) {
        self.author_id = author_id;
    }

    /// Insert the book, stamping `date_added` with the current time
    pub fn add_to_database(&mut self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        let date_added = datetime_utils::now();
        let affected = gateway.execute_update(
            INSERT_SQL,
            &[
                &self.title,
                &self.description,
                &self.number_of_pages,
                &date_added,
                &self.genre,
                &self.author_id,
            ],
        )?;
        adopt_generated_id(&mut self.book_id, gateway, affected);
        self.date_added = Some(date_added);

        Ok(affected)
    }

    /// Persist every mutable field
    pub fn save_changes(&self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        gateway.execute_update(
            UPDATE_SQL,
            &[
                &self.title,
                &self.description,
                &self.number_of_pages,
                &self.genre,
                &self.author_id,
                &self.book_id,
            ],
        )
    }

    pub fn delete(&self, gateway: &mut Gateway) -> Result<usize, LibraryError> {
        gateway.execute_update(DELETE_SQL, &[&self.book_id])
    }

    /// Books written by the given author, ordered by id
    pub fn find_by_author(gateway: &mut Gateway, author_id: i64) -> Result<Vec<Self>, LibraryError> {
        let sql = format!(
            "SELECT {} FROM book WHERE author_id = ? ORDER BY book_id",
            Self::COLUMNS
        );
        gateway.query_map(&sql, &[&author_id], Self::from_row)
    }
}

impl Record for Book {
    const TABLE: &'static str = "book";
    const ID_COLUMN: &'static str = "book_id";
    const COLUMNS: &'static str =
        "book_id, title, description, number_of_pages, date_added, genre, author_id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            book_id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            number_of_pages: row.get(3)?,
            date_added: row.get(4)?,
            genre: row.get(5)?,
            author_id: row.get(6)?,
        })
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book{{book_id = {}, title = '{}', description = '{}', number_of_pages = {}, \
             date_added = {}, genre = '{}', author_id = {}}}",
            self.book_id,
            self.title,
            self.description,
            self.number_of_pages,
            format_optional(self.date_added.as_ref()),
            self.genre,
            self.author_id
        )
    }
}

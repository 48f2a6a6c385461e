/*!
 * Table definitions for the library store.
 *
 * `create_tables` is idempotent and only bootstraps an empty SQLite store;
 * there is no versioning or migration here.
 */

use log::info;

use super::gateway::Gateway;
use crate::errors::LibraryError;

/// Tables in creation order
pub const TABLES: [&str; 4] = ["author", "user", "book", "borrow"];

const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS author (
        author_id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        date_added TEXT
    );

    CREATE TABLE IF NOT EXISTS user (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        date_added TEXT,
        booking_record BOOLEAN NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS book (
        book_id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        number_of_pages INTEGER NOT NULL,
        date_added TEXT,
        genre TEXT NOT NULL DEFAULT '',
        author_id INTEGER NOT NULL REFERENCES author(author_id)
    );

    CREATE INDEX IF NOT EXISTS idx_book_author ON book(author_id);

    CREATE TABLE IF NOT EXISTS borrow (
        borrowing_id INTEGER PRIMARY KEY AUTOINCREMENT,
        book_id INTEGER NOT NULL REFERENCES book(book_id),
        user_id INTEGER NOT NULL REFERENCES user(user_id),
        borrowing_date TEXT,
        expected_return_date TEXT NOT NULL,
        actual_return_date TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_borrow_book ON borrow(book_id);
    CREATE INDEX IF NOT EXISTS idx_borrow_user ON borrow(user_id);
"#;

const DROP_TABLES: &str = r#"
    DROP TABLE IF EXISTS borrow;
    DROP TABLE IF EXISTS book;
    DROP TABLE IF EXISTS user;
    DROP TABLE IF EXISTS author;
"#;

/// Create the four library tables if they do not exist yet
pub fn create_tables(gateway: &mut Gateway) -> Result<(), LibraryError> {
    gateway.execute_batch(CREATE_TABLES)?;
    info!("Library tables ready on {}", gateway.target());
    Ok(())
}

/// Drop the four library tables
pub fn drop_tables(gateway: &mut Gateway) -> Result<(), LibraryError> {
    gateway.execute_batch(DROP_TABLES)?;
    info!("Library tables dropped on {}", gateway.target());
    Ok(())
}

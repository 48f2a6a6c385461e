/*!
 * Common test utilities for the librarium test suite
 */

use anyhow::Result;
use chrono::{DateTime, Duration, FixedOffset};
use tempfile::TempDir;

use librarium::database::schema;
use librarium::{Author, Book, Gateway, Target, User};

/// Route library logs through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// In-memory gateway with the library tables created
pub fn memory_gateway() -> Result<Gateway> {
    init_logging();
    let mut gateway = Gateway::in_memory();
    schema::create_tables(&mut gateway)?;
    Ok(gateway)
}

/// File-backed gateway with the library tables created
///
/// The returned directory must outlive the gateway.
pub fn file_gateway() -> Result<(Gateway, TempDir)> {
    init_logging();
    let dir = TempDir::new()?;
    let mut gateway = Gateway::new(Target::sqlite(dir.path().join("library.db")));
    schema::create_tables(&mut gateway)?;
    Ok((gateway, dir))
}

/// Insert an author, a book by that author and a member
pub fn seed_catalogue(gateway: &mut Gateway) -> Result<(Author, Book, User)> {
    let mut author = Author::new("Jane", "Austen");
    author.add_to_database(gateway)?;

    let mut book = Book::new(
        "Pride and Prejudice",
        "A novel of manners",
        432,
        "Fiction",
        author.author_id(),
    );
    book.add_to_database(gateway)?;

    let mut user = User::new("Ada", "Lovelace");
    user.add_to_database(gateway)?;

    Ok((author, book, user))
}

/// Due date two weeks from now
pub fn two_weeks_from_now() -> DateTime<FixedOffset> {
    librarium::datetime_utils::now() + Duration::days(14)
}

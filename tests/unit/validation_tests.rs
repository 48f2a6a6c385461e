/*!
 * Tests for the optional record checks
 */

use anyhow::Result;
use chrono::{Duration, FixedOffset, TimeZone};
use librarium::validation::{ensure_valid, Validate};
use librarium::{Author, Book, Borrow, ErrorKind, User};

use crate::common;

#[test]
fn test_user_withBlankNames_shouldReportBothFields() {
    let user = User::new("", " ");
    let fields: Vec<_> = user.validate().into_iter().map(|issue| issue.field).collect();
    assert_eq!(fields, vec!["first_name", "last_name"]);
}

#[test]
fn test_book_withNegativePages_shouldReportPageCount() {
    let book = Book::new("Emma", "", -3, "Fiction", 1);
    let issues = book.validate();
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("-3"));
}

#[test]
fn test_borrow_withUnassignedIds_shouldReportReferences() {
    let due = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .unwrap();
    let borrow = Borrow::new(-1, -1, due);
    let fields: Vec<_> = borrow.validate().into_iter().map(|issue| issue.field).collect();
    assert_eq!(fields, vec!["book_id", "user_id"]);
}

#[test]
fn test_borrow_dueBeforeBorrowed_shouldReportExpectedReturn() {
    let borrowed = librarium::datetime_utils::now();
    let borrow = Borrow::from_parts(1, 1, 1, Some(borrowed), borrowed - Duration::days(1), None);
    let error = ensure_valid(&borrow).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert!(error.to_string().contains("expected_return_date"));
}

#[test]
fn test_ensureValid_isNotRunByPersistence() -> Result<()> {
    let mut gateway = common::memory_gateway()?;

    let mut author = Author::new("", "");
    assert!(!author.is_valid());

    // Persistence stores invalid records as they are
    assert_eq!(author.add_to_database(&mut gateway)?, 1);
    Ok(())
}

/*!
 * Integration tests for borrowing and returning books
 */

use anyhow::Result;
use chrono::Duration;
use librarium::{Borrow, Record};

use crate::common;

#[test]
fn test_borrow_lifecycle_shouldStampBorrowAndReturnDates() -> Result<()> {
    let mut gateway = common::memory_gateway()?;
    let (_, book, user) = common::seed_catalogue(&mut gateway)?;

    let due = common::two_weeks_from_now();
    let mut borrow = Borrow::new(book.book_id(), user.user_id(), due);

    let start = librarium::datetime_utils::now();
    assert_eq!(borrow.add_to_database(&mut gateway)?, 1);
    let borrowed_at = borrow.borrowing_date().expect("stamped on insert");
    assert!(borrowed_at >= start);
    assert!(borrow.to_string().contains("actual_return_date = NULL"));

    assert_eq!(borrow.return_book(&mut gateway)?, 1);
    let returned_at = borrow.actual_return_date().expect("stamped on return");
    assert!(returned_at >= borrowed_at);

    let stored = Borrow::find_by_id(&mut gateway, borrow.borrowing_id())?.expect("row exists");
    assert_eq!(stored.borrowing_date(), Some(borrowed_at));
    assert_eq!(stored.expected_return_date(), due);
    assert_eq!(stored.actual_return_date(), Some(returned_at));
    assert!(!stored.to_string().contains("NULL"));
    Ok(())
}

#[test]
fn test_returnBook_calledTwice_shouldOverwriteReturnDate() -> Result<()> {
    let mut gateway = common::memory_gateway()?;
    let (_, book, user) = common::seed_catalogue(&mut gateway)?;

    let mut borrow = Borrow::new(book.book_id(), user.user_id(), common::two_weeks_from_now());
    borrow.add_to_database(&mut gateway)?;

    borrow.return_book(&mut gateway)?;
    let first = borrow.actual_return_date().expect("first return");
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert_eq!(borrow.return_book(&mut gateway)?, 1);
    let second = borrow.actual_return_date().expect("second return");

    assert!(second > first);
    let stored = Borrow::find_by_id(&mut gateway, borrow.borrowing_id())?.expect("row exists");
    assert_eq!(stored.actual_return_date(), Some(second));
    Ok(())
}

#[test]
fn test_saveChanges_shouldMoveDueDateAndKeepStamps() -> Result<()> {
    let mut gateway = common::memory_gateway()?;
    let (_, book, user) = common::seed_catalogue(&mut gateway)?;

    let mut borrow = Borrow::new(book.book_id(), user.user_id(), common::two_weeks_from_now());
    borrow.add_to_database(&mut gateway)?;

    let extended = borrow.expected_return_date() + Duration::days(7);
    borrow.set_expected_return_date(extended);
    assert_eq!(borrow.save_changes(&mut gateway)?, 1);

    let stored = Borrow::find_by_id(&mut gateway, borrow.borrowing_id())?.expect("row exists");
    assert_eq!(stored.expected_return_date(), extended);
    assert_eq!(stored.borrowing_date(), borrow.borrowing_date());
    assert!(stored.actual_return_date().is_none());
    Ok(())
}

#[test]
fn test_findOutstanding_shouldSkipReturnedBorrows() -> Result<()> {
    let mut gateway = common::memory_gateway()?;
    let (_, book, user) = common::seed_catalogue(&mut gateway)?;

    let mut returned = Borrow::new(book.book_id(), user.user_id(), common::two_weeks_from_now());
    returned.add_to_database(&mut gateway)?;
    returned.return_book(&mut gateway)?;

    let mut open = Borrow::new(book.book_id(), user.user_id(), common::two_weeks_from_now());
    open.add_to_database(&mut gateway)?;

    let outstanding = Borrow::find_outstanding(&mut gateway)?;
    assert_eq!(outstanding.len(), 1);
    assert_eq!(outstanding[0].borrowing_id(), open.borrowing_id());

    let by_user = Borrow::find_by_user(&mut gateway, user.user_id())?;
    assert_eq!(by_user.len(), 2);
    assert!(Borrow::find_by_user(&mut gateway, user.user_id() + 1)?.is_empty());
    Ok(())
}

#[test]
fn test_returnBook_unstoredBorrow_shouldAffectNoRows() -> Result<()> {
    let mut gateway = common::memory_gateway()?;
    let mut borrow = Borrow::new(1, 1, common::two_weeks_from_now());

    assert_eq!(borrow.return_book(&mut gateway)?, 0);
    // The in-memory record is still stamped
    assert!(borrow.is_returned());
    assert_eq!(borrow.delete(&mut gateway)?, 0);
    Ok(())
}

/*!
 * Optional pre-persistence checks for entity records.
 *
 * Persistence never validates on its own: callers that want field checks
 * run `validate` (or `ensure_valid`) before `add_to_database` or
 * `save_changes`.
 *
 * Rules:
 * - names and titles must not be blank
 * - page counts must be positive
 * - foreign ids must be assigned
 * - a borrow cannot be due or returned before it was borrowed
 */

use std::fmt;

use log::debug;

use crate::errors::LibraryError;
use crate::models::{Author, Book, Borrow, User};

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Field that failed
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Field checks for a record
pub trait Validate {
    /// Every failed check, empty when the record is valid
    fn validate(&self) -> Vec<ValidationIssue>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Fail with a validation error listing every issue
pub fn ensure_valid<T: Validate + ?Sized>(record: &T) -> Result<(), LibraryError> {
    let issues = record.validate();
    if issues.is_empty() {
        Ok(())
    } else {
        debug!("Validation failed with {} issues", issues.len());
        Err(LibraryError::Validation(issues))
    }
}

fn check_not_blank(issues: &mut Vec<ValidationIssue>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(field, "must not be blank"));
    }
}

fn check_assigned(issues: &mut Vec<ValidationIssue>, field: &'static str, id: i64) {
    if id < 0 {
        issues.push(ValidationIssue::new(field, "must reference a stored record"));
    }
}

impl Validate for Author {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_not_blank(&mut issues, "first_name", self.first_name());
        check_not_blank(&mut issues, "last_name", self.last_name());
        issues
    }
}

impl Validate for User {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_not_blank(&mut issues, "first_name", self.first_name());
        check_not_blank(&mut issues, "last_name", self.last_name());
        issues
    }
}

impl Validate for Book {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_not_blank(&mut issues, "title", self.title());
        if self.number_of_pages() <= 0 {
            issues.push(ValidationIssue::new(
                "number_of_pages",
                format!("must be positive, got {}", self.number_of_pages()),
            ));
        }
        check_assigned(&mut issues, "author_id", self.author_id());
        issues
    }
}

impl Validate for Borrow {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_assigned(&mut issues, "book_id", self.book_id());
        check_assigned(&mut issues, "user_id", self.user_id());

        if let Some(borrowed) = self.borrowing_date() {
            if self.expected_return_date() < borrowed {
                issues.push(ValidationIssue::new(
                    "expected_return_date",
                    "must not be before the borrowing date",
                ));
            }
            if self.actual_return_date().is_some_and(|returned| returned < borrowed) {
                issues.push(ValidationIssue::new(
                    "actual_return_date",
                    "must not be before the borrowing date",
                ));
            }
        }

        issues
    }
}

//! Insert payload validation.
//!
//! Catches malformed input (blank names, blank ISBNs, nonsensical editions
//! and years) before it reaches the store. Uniqueness and referential
//! integrity are not checked here; the database enforces those.
//!
//! # Examples
//!
//! ```
//! use book_catalog_core::*;
//!
//! let book = NewBook::new("1234567890", "Advanced Python Programming", 1, "2024", 1);
//! assert!(validate_new_book(&book).is_empty());
//!
//! let bad = NewBook::new("", "Advanced Python Programming", 0, "2024", 1);
//! assert_eq!(validate_new_book(&bad).len(), 2);
//! ```

use thiserror::Error;

use crate::{NewAuthor, NewBook};

/// Payload validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// First name is empty or whitespace-only.
    #[error("author first name cannot be empty")]
    EmptyFirstName,
    /// Last name is empty or whitespace-only.
    #[error("author last name cannot be empty")]
    EmptyLastName,
    /// ISBN is empty or whitespace-only.
    #[error("isbn cannot be empty")]
    EmptyIsbn,
    /// Title text is empty or whitespace-only.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// Edition numbers start at 1.
    #[error("edition must be at least 1, got {0}")]
    InvalidEdition(i64),
    /// Copyright is not a four-digit year.
    #[error("copyright must be a four-digit year, got '{0}'")]
    InvalidCopyright(String),
}

/// Validates an author payload.
pub fn validate_new_author(author: &NewAuthor) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if author.first.trim().is_empty() {
        errors.push(ValidationError::EmptyFirstName);
    }
    if author.last.trim().is_empty() {
        errors.push(ValidationError::EmptyLastName);
    }
    errors
}

/// Validates a book payload.
///
/// The author id is not checked; whether it exists is the store's call.
pub fn validate_new_book(book: &NewBook) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if book.isbn.trim().is_empty() {
        errors.push(ValidationError::EmptyIsbn);
    }
    if book.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    }
    if book.edition < 1 {
        errors.push(ValidationError::InvalidEdition(book.edition));
    }
    if !is_year(&book.copyright) {
        errors.push(ValidationError::InvalidCopyright(book.copyright.clone()));
    }
    errors
}

fn is_year(value: &str) -> bool {
    value.len() == 4 && value.chars().all(|c| c.is_ascii_digit())
}

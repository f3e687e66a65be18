//! Core catalog types, validation, and table rendering.
//!
//! This crate defines the foundational types shared by the storage backend
//! and the command-line front end:
//!
//! - [`Author`], [`Title`], [`AuthorIsbn`] — rows of the three catalog
//!   tables.
//! - [`BookListing`] — the `(title, copyright, isbn)` projection returned
//!   when looking up books by author.
//! - [`NewAuthor`], [`NewBook`] — insert payloads.
//!
//! Validation ([`validate_new_author`], [`validate_new_book`]) catches
//! malformed payloads before they reach the store.
//!
//! Rendering ([`render_as_table`]) lays rows out under column labels and
//! returns a [`Table`] that prints as aligned text or Markdown.
//!
//! # Example
//!
//! ```
//! use book_catalog_core::*;
//!
//! let listings = vec![
//!     BookListing::new("Intro to Python", "2020", "0135404673"),
//!     BookListing::new("Java How to Program", "2018", "0134743350"),
//! ];
//! let table = render_as_table(&listings, &BookListing::COLUMNS).unwrap();
//! assert_eq!(table.rows().len(), 2);
//! ```

mod table;
mod types;
mod validate;

pub use table::{Table, TableError, TableRow, render_as_table};
pub use types::*;
pub use validate::{ValidationError, validate_new_author, validate_new_book};

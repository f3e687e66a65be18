//! SQLite accessor for the book catalog.
//!
//! The catalog is a small relational store of authors, titles, and the
//! author-to-ISBN links between them. This crate wraps one SQLite
//! connection in a [`Catalog`] and exposes the catalog's fixed queries and
//! inserts as methods returning [`book_catalog_core`] types.
//!
//! # Architecture
//!
//! - **`catalog`** — the accessor: open/close, listings, join lookup, inserts
//! - **`schema`** — table DDL used to bootstrap empty catalogs
//! - **`error`** — connection / query / constraint error taxonomy
//!
//! # Quick start
//!
//! ```no_run
//! use book_catalog_core::{BookListing, render_as_table};
//! use book_catalog_sqlite::Catalog;
//!
//! let catalog = Catalog::open("books.db").unwrap();
//!
//! let books = catalog.list_books_by_author_last_name("Deitel").unwrap();
//! let table = render_as_table(&books, &BookListing::COLUMNS).unwrap();
//! print!("{table}");
//! ```
//!
//! # Expected tables
//!
//! `authors(id, first, last)`, `titles(isbn, title, edition, copyright)`,
//! and `author_ISBN(id, isbn)`. [`Catalog::open`] assumes they exist;
//! [`Catalog::create`] creates them in a new database.

mod catalog;
mod error;
mod schema;

pub use catalog::{Catalog, CatalogStatus};
pub use error::{CatalogError, Result};

//! The catalog accessor.
//!
//! [`Catalog`] owns a single SQLite connection and exposes the fixed set of
//! catalog statements: two ordered listings, the author-to-books join, and
//! the author and book inserts. Every statement is parameterized; ordering
//! and matching follow SQLite's default (BINARY) collation.
//!
//! The connection runs in autocommit mode, so a write is durable once the
//! call returns. [`Catalog::insert_book`] writes two rows and wraps them in
//! a transaction so a failure leaves neither behind.
//!
//! # Example
//!
//! ```no_run
//! use book_catalog_core::{NewAuthor, NewBook};
//! use book_catalog_sqlite::Catalog;
//!
//! let mut catalog = Catalog::open("books.db").unwrap();
//!
//! for last in catalog.list_authors_last_name_desc().unwrap() {
//!     println!("{last}");
//! }
//!
//! let id = catalog.insert_author(&NewAuthor::new("Jane", "Smith")).unwrap();
//! catalog
//!     .insert_book(&NewBook::new("1234567890", "Advanced Python Programming", 1, "2024", id))
//!     .unwrap();
//!
//! catalog.close().unwrap();
//! ```

use std::path::{Path, PathBuf};

use book_catalog_core::{BookListing, NewAuthor, NewBook};
use rusqlite::{Connection, OpenFlags, OptionalExtension, ffi, params};
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::schema::{SCHEMA_SQL, TABLES};

/// Row counts and table presence for a catalog.
///
/// Returned by [`Catalog::status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStatus {
    /// Whether all three catalog tables exist.
    pub tables_exist: bool,
    /// Number of rows in `authors`.
    pub author_count: usize,
    /// Number of rows in `titles`.
    pub title_count: usize,
    /// Number of rows in `author_ISBN`.
    pub link_count: usize,
}

/// Accessor over a single catalog connection.
///
/// The connection is released when the catalog is dropped or explicitly
/// closed with [`close`](Self::close).
pub struct Catalog {
    conn: Connection,
    path: PathBuf,
}

impl Catalog {
    /// Opens an existing catalog database for reading and writing.
    ///
    /// The file is never created; a missing file is an error, as is a file
    /// that is not a SQLite database.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Connection`] if the store cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // SQLite reads `file:` names as URIs whose `mode=rwc` can create the
        // database, so only paths naming an existing file are opened.
        if !path.is_file() {
            return Err(CatalogError::Connection {
                path: path.to_path_buf(),
                source: rusqlite::Error::SqliteFailure(
                    ffi::Error::new(ffi::SQLITE_CANTOPEN),
                    Some("no such database file".to_string()),
                ),
            });
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| {
            CatalogError::Connection {
                path: path.to_path_buf(),
                source,
            }
        })?;
        // Force a read so a file that is not a database fails here.
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|source| CatalogError::Connection {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::with_path(conn, path)?;
        info!(path = %path.display(), "opened catalog");
        Ok(catalog)
    }

    /// Creates (or opens) a catalog database and its tables.
    ///
    /// Tables are created with `CREATE TABLE IF NOT EXISTS`, so calling this
    /// on an existing catalog leaves its data untouched.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| CatalogError::Connection {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::with_path(conn, path)?;
        catalog.ensure_schema()?;
        info!(path = %path.display(), "created catalog");
        Ok(catalog)
    }

    /// Opens a private in-memory catalog with all tables created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| CatalogError::Connection {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let mut catalog = Self::with_path(conn, Path::new(":memory:"))?;
        catalog.ensure_schema()?;
        Ok(catalog)
    }

    /// Wraps an already-open connection.
    ///
    /// Foreign-key enforcement is switched on for the connection.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let path = conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(":memory:"));
        Self::with_path(conn, &path)
    }

    fn with_path(conn: Connection, path: &Path) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|source| CatalogError::Connection {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Creates any missing catalog tables inside one transaction.
    pub fn ensure_schema(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(SCHEMA_SQL)?;
        tx.commit()?;
        Ok(())
    }

    /// Returns every author's last name, sorted descending.
    ///
    /// Duplicate last names are kept. An empty catalog yields an empty
    /// vector.
    pub fn list_authors_last_name_desc(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT last FROM authors ORDER BY last DESC")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(rows = names.len(), "listed author last names");
        Ok(names)
    }

    /// Returns every title, sorted ascending.
    pub fn list_titles_asc(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title FROM titles ORDER BY title ASC")?;
        let titles = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(rows = titles.len(), "listed titles");
        Ok(titles)
    }

    /// Returns the books credited to authors with exactly this last name,
    /// sorted by title.
    ///
    /// An unknown name yields an empty vector, not an error.
    pub fn list_books_by_author_last_name(&self, last_name: &str) -> Result<Vec<BookListing>> {
        let mut stmt = self.conn.prepare(
            "SELECT titles.title, titles.copyright, titles.isbn
             FROM authors
             JOIN author_ISBN ON authors.id = author_ISBN.id
             JOIN titles ON author_ISBN.isbn = titles.isbn
             WHERE authors.last = ?1
             ORDER BY titles.title ASC",
        )?;
        let books = stmt
            .query_map(params![last_name], |row| {
                Ok(BookListing {
                    title: row.get(0)?,
                    copyright: row.get(1)?,
                    isbn: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(last_name, rows = books.len(), "listed books by author");
        Ok(books)
    }

    /// Returns the id of the first author (lowest id) with this last name.
    pub fn find_author_id(&self, last_name: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM authors WHERE last = ?1 ORDER BY id LIMIT 1",
                params![last_name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Appends an author and returns the id the store assigned.
    ///
    /// No duplicate check is made; two authors may share a name.
    pub fn insert_author(&mut self, author: &NewAuthor) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO authors (first, last) VALUES (?1, ?2)",
            params![author.first, author.last],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, first = %author.first, last = %author.last, "inserted author");
        Ok(id)
    }

    /// Appends a title and links it to an existing author.
    ///
    /// Both rows are written in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Constraint`] if the ISBN already exists or the
    /// author id does not reference an author. The catalog is unchanged in
    /// either case.
    pub fn insert_book(&mut self, book: &NewBook) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO titles (isbn, title, edition, copyright) VALUES (?1, ?2, ?3, ?4)",
            params![book.isbn, book.title, book.edition, book.copyright],
        )?;
        tx.execute(
            "INSERT INTO author_ISBN (id, isbn) VALUES (?1, ?2)",
            params![book.author_id, book.isbn],
        )?;
        tx.commit()?;
        info!(isbn = %book.isbn, author_id = book.author_id, "inserted book");
        Ok(())
    }

    /// Reports whether the catalog tables exist and how many rows each holds.
    pub fn status(&self) -> Result<CatalogStatus> {
        for table in TABLES {
            if !self.table_exists(table)? {
                return Ok(CatalogStatus::default());
            }
        }

        Ok(CatalogStatus {
            tables_exist: true,
            author_count: self.count_rows("authors")?,
            title_count: self.count_rows("titles")?,
            link_count: self.count_rows("author_ISBN")?,
        })
    }

    /// Location the catalog was opened from (`:memory:` for in-memory stores).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, source)| CatalogError::Connection {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "closed catalog");
        Ok(())
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_catalog_starts_empty() {
        let catalog = Catalog::open_in_memory().unwrap();
        assert!(catalog.list_authors_last_name_desc().unwrap().is_empty());
        assert!(catalog.list_titles_asc().unwrap().is_empty());
        assert!(catalog
            .list_books_by_author_last_name("Deitel")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_insert_author_returns_increasing_ids() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        let first = catalog.insert_author(&NewAuthor::new("Jane", "Smith")).unwrap();
        let second = catalog.insert_author(&NewAuthor::new("Jane", "Smith")).unwrap();
        assert!(second > first);
        assert_eq!(catalog.find_author_id("Smith").unwrap(), Some(first));
    }

    #[test]
    fn test_find_author_id_missing() {
        let catalog = Catalog::open_in_memory().unwrap();
        assert_eq!(catalog.find_author_id("Nobody").unwrap(), None);
    }

    #[test]
    fn test_status_without_tables() {
        let conn = Connection::open_in_memory().unwrap();
        let catalog = Catalog::from_connection(conn).unwrap();
        let status = catalog.status().unwrap();
        assert!(!status.tables_exist);
        assert_eq!(status.author_count, 0);
    }

    #[test]
    fn test_from_connection_enables_foreign_keys() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        let catalog = Catalog::from_connection(conn).unwrap();

        let enabled: i64 = catalog
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_open_uri_name_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x.db");
        let uri = format!("file:{}?mode=rwc", target.display());

        let err = Catalog::open(&uri).err().unwrap();
        assert!(matches!(err, CatalogError::Connection { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_path_of_in_memory_catalog() {
        let catalog = Catalog::open_in_memory().unwrap();
        assert_eq!(catalog.path(), Path::new(":memory:"));
    }
}

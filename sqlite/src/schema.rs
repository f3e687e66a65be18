//! Catalog table definitions.
//!
//! The accessor expects these three tables to exist already. The DDL here
//! matches the layout of the sample `books.db` database and is used to
//! bootstrap new, empty catalogs.
//!
//! - `authors` — surrogate-keyed author names
//! - `titles` — books keyed by ISBN
//! - `author_ISBN` — many-to-many links between the two

/// Table names in dependency order (referenced tables first).
pub(crate) const TABLES: [&str; 3] = ["authors", "titles", "author_ISBN"];

/// `CREATE TABLE IF NOT EXISTS` statements for all catalog tables.
pub(crate) const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first TEXT NOT NULL,
    last TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS titles (
    isbn TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    edition INTEGER NOT NULL,
    copyright TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS author_ISBN (
    id INTEGER NOT NULL,
    isbn TEXT NOT NULL,
    FOREIGN KEY (id) REFERENCES authors(id),
    FOREIGN KEY (isbn) REFERENCES titles(isbn)
);
"#;

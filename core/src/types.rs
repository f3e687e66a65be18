//! Catalog type definitions.
//!
//! This module defines the rows stored in the catalog (authors, titles, and
//! the author-to-ISBN links between them) plus the projections and insert
//! payloads the accessor works with. All types serialize with [`serde`] so
//! query results can be emitted as JSON or YAML.

use serde::{Deserialize, Serialize};

/// A row of the `authors` table.
///
/// The `id` is a surrogate key assigned by the database engine on insert.
///
/// # Examples
///
/// ```
/// use book_catalog_core::Author;
///
/// let author = Author::new(1, "Paul", "Deitel");
/// assert_eq!(author.full_name(), "Paul Deitel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Engine-assigned identity.
    pub id: i64,
    /// First name.
    pub first: String,
    /// Last name.
    pub last: String,
}

impl Author {
    /// Creates an author row.
    pub fn new(id: i64, first: &str, last: &str) -> Self {
        Self {
            id,
            first: first.to_string(),
            last: last.to_string(),
        }
    }

    /// Returns `"{first} {last}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// A row of the `titles` table, keyed by ISBN.
///
/// # Examples
///
/// ```
/// use book_catalog_core::Title;
///
/// let title = Title::new("0135404673", "Intro to Python for Computer Science and Data Science", 1, "2020");
/// assert_eq!(title.edition, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// ISBN, the primary key.
    pub isbn: String,
    /// Title text.
    pub title: String,
    /// Edition number.
    pub edition: i64,
    /// Copyright year.
    pub copyright: String,
}

impl Title {
    /// Creates a title row.
    pub fn new(isbn: &str, title: &str, edition: i64, copyright: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            edition,
            copyright: copyright.to_string(),
        }
    }
}

/// A row of the `author_ISBN` join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIsbn {
    /// Referenced author id.
    pub id: i64,
    /// Referenced title ISBN.
    pub isbn: String,
}

/// One book written by a given author, as returned by the author lookup.
///
/// Field order matches the column order of the lookup query:
/// title, copyright, ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookListing {
    pub title: String,
    pub copyright: String,
    pub isbn: String,
}

impl BookListing {
    /// Column labels used when rendering listings as a table.
    pub const COLUMNS: [&'static str; 3] = ["Title", "Copyright", "ISBN"];

    pub fn new(title: &str, copyright: &str, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            copyright: copyright.to_string(),
            isbn: isbn.to_string(),
        }
    }
}

/// Payload for inserting an author. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first: String,
    pub last: String,
}

impl NewAuthor {
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            first: first.to_string(),
            last: last.to_string(),
        }
    }
}

/// Payload for inserting a title and linking it to an existing author.
///
/// # Examples
///
/// ```
/// use book_catalog_core::NewBook;
///
/// let book = NewBook::new("1234567890", "Advanced Python Programming", 1, "2024", 7);
/// assert_eq!(book.title().isbn, "1234567890");
/// assert_eq!(book.link().id, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub edition: i64,
    pub copyright: String,
    /// Id of the author the new title is credited to.
    pub author_id: i64,
}

impl NewBook {
    pub fn new(isbn: &str, title: &str, edition: i64, copyright: &str, author_id: i64) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            edition,
            copyright: copyright.to_string(),
            author_id,
        }
    }

    /// The `titles` row this payload inserts.
    pub fn title(&self) -> Title {
        Title::new(&self.isbn, &self.title, self.edition, &self.copyright)
    }

    /// The `author_ISBN` row this payload inserts.
    pub fn link(&self) -> AuthorIsbn {
        AuthorIsbn {
            id: self.author_id,
            isbn: self.isbn.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_listing_serializes_in_column_order() {
        let listing = BookListing::new("Java How to Program", "2018", "0134743350");
        let json = serde_json::to_string(&listing).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Java How to Program","copyright":"2018","isbn":"0134743350"}"#
        );
    }

    #[test]
    fn test_new_book_splits_into_title_and_link() {
        let book = NewBook::new("1234567890", "Advanced Python Programming", 1, "2024", 6);
        assert_eq!(
            book.title(),
            Title::new("1234567890", "Advanced Python Programming", 1, "2024")
        );
        assert_eq!(
            book.link(),
            AuthorIsbn {
                id: 6,
                isbn: "1234567890".to_string()
            }
        );
    }
}

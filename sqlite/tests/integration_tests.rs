//! Integration tests for the book-catalog-sqlite crate.

use book_catalog_core::{BookListing, NewAuthor, NewBook, render_as_table};
use book_catalog_sqlite::{Catalog, CatalogError};
use rusqlite::Connection;

/// Creates an in-memory catalog with one Deitel linked to two titles, plus
/// an unrelated author and title.
fn deitel_catalog() -> Catalog {
    let mut catalog = Catalog::open_in_memory().unwrap();
    let deitel = catalog
        .insert_author(&NewAuthor::new("Paul", "Deitel"))
        .unwrap();
    let quirk = catalog
        .insert_author(&NewAuthor::new("Dan", "Quirk"))
        .unwrap();

    catalog
        .insert_book(&NewBook::new(
            "0134743350",
            "Java How to Program",
            11,
            "2018",
            deitel,
        ))
        .unwrap();
    catalog
        .insert_book(&NewBook::new(
            "0135404673",
            "Intro to Python for Computer Science and Data Science",
            1,
            "2020",
            deitel,
        ))
        .unwrap();
    catalog
        .insert_book(&NewBook::new(
            "0136151574",
            "Visual C++ How to Program",
            2,
            "2008",
            quirk,
        ))
        .unwrap();
    catalog
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_authors_sorted_descending() {
    let mut catalog = Catalog::open_in_memory().unwrap();
    for (first, last) in [
        ("Harvey", "Deitel"),
        ("Alexander", "Wald"),
        ("Dan", "Quirk"),
        ("Paul", "Deitel"),
    ] {
        catalog.insert_author(&NewAuthor::new(first, last)).unwrap();
    }

    let names = catalog.list_authors_last_name_desc().unwrap();
    assert_eq!(names, vec!["Wald", "Quirk", "Deitel", "Deitel"]);
    assert!(names.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_titles_sorted_ascending() {
    let catalog = deitel_catalog();
    let titles = catalog.list_titles_asc().unwrap();
    assert_eq!(
        titles,
        vec![
            "Intro to Python for Computer Science and Data Science",
            "Java How to Program",
            "Visual C++ How to Program",
        ]
    );
    assert!(titles.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_ordering_uses_binary_collation() {
    let mut catalog = Catalog::open_in_memory().unwrap();
    catalog.insert_author(&NewAuthor::new("a", "alpha")).unwrap();
    catalog.insert_author(&NewAuthor::new("b", "Beta")).unwrap();

    // Uppercase sorts before lowercase under BINARY.
    assert_eq!(
        catalog.list_authors_last_name_desc().unwrap(),
        vec!["alpha", "Beta"]
    );
}

// =============================================================================
// Books by author
// =============================================================================

#[test]
fn test_books_by_deitel() {
    let catalog = deitel_catalog();
    let books = catalog.list_books_by_author_last_name("Deitel").unwrap();

    assert_eq!(
        books,
        vec![
            BookListing::new(
                "Intro to Python for Computer Science and Data Science",
                "2020",
                "0135404673"
            ),
            BookListing::new("Java How to Program", "2018", "0134743350"),
        ]
    );
}

#[test]
fn test_books_by_unknown_author_is_empty() {
    let catalog = deitel_catalog();
    assert!(catalog
        .list_books_by_author_last_name("Nobody")
        .unwrap()
        .is_empty());
}

#[test]
fn test_books_by_author_is_case_sensitive() {
    let catalog = deitel_catalog();
    assert!(catalog
        .list_books_by_author_last_name("deitel")
        .unwrap()
        .is_empty());
}

#[test]
fn test_shared_last_name_yields_one_row_per_link() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.db");

    let mut catalog = Catalog::create(&path).unwrap();
    let paul = catalog
        .insert_author(&NewAuthor::new("Paul", "Deitel"))
        .unwrap();
    let harvey = catalog
        .insert_author(&NewAuthor::new("Harvey", "Deitel"))
        .unwrap();
    catalog
        .insert_book(&NewBook::new("0134743350", "Java How to Program", 11, "2018", paul))
        .unwrap();
    catalog
        .insert_book(&NewBook::new("0133976890", "C How to Program", 8, "2016", paul))
        .unwrap();

    // Co-authorship links are outside the accessor's write surface.
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO author_ISBN (id, isbn) VALUES (?1, '0134743350')",
        [harvey],
    )
    .unwrap();
    drop(conn);

    let books = catalog.list_books_by_author_last_name("Deitel").unwrap();
    assert_eq!(books.len(), 3);
    assert_eq!(books[0].title, "C How to Program");
    assert_eq!(books[1], books[2]);
}

// =============================================================================
// Inserts
// =============================================================================

#[test]
fn test_insert_author_then_book_is_listed() {
    let mut catalog = deitel_catalog();
    catalog
        .insert_author(&NewAuthor::new("Jane", "Smith"))
        .unwrap();
    let id = catalog.find_author_id("Smith").unwrap().unwrap();

    catalog
        .insert_book(&NewBook::new(
            "1234567890",
            "Advanced Python Programming",
            1,
            "2024",
            id,
        ))
        .unwrap();

    let books = catalog.list_books_by_author_last_name("Smith").unwrap();
    assert_eq!(
        books,
        vec![BookListing::new(
            "Advanced Python Programming",
            "2024",
            "1234567890"
        )]
    );
}

#[test]
fn test_duplicate_authors_are_allowed() {
    let mut catalog = Catalog::open_in_memory().unwrap();
    catalog.insert_author(&NewAuthor::new("Jane", "Smith")).unwrap();
    catalog.insert_author(&NewAuthor::new("Jane", "Smith")).unwrap();
    assert_eq!(catalog.status().unwrap().author_count, 2);
}

#[test]
fn test_duplicate_isbn_is_constraint_and_leaves_store_unchanged() {
    let mut catalog = deitel_catalog();
    let quirk = catalog.find_author_id("Quirk").unwrap().unwrap();
    let before = catalog.status().unwrap();

    let err = catalog
        .insert_book(&NewBook::new(
            "0134743350",
            "Some Other Book",
            1,
            "2024",
            quirk,
        ))
        .unwrap_err();

    assert!(matches!(err, CatalogError::Constraint(_)));
    assert_eq!(catalog.status().unwrap(), before);
    assert_eq!(
        catalog.list_books_by_author_last_name("Quirk").unwrap().len(),
        1
    );
}

#[test]
fn test_unknown_author_id_is_constraint_and_rolls_back_title() {
    let mut catalog = deitel_catalog();
    let before = catalog.status().unwrap();

    let err = catalog
        .insert_book(&NewBook::new(
            "9999999999",
            "Orphan Title",
            1,
            "2024",
            999,
        ))
        .unwrap_err();

    assert!(err.is_constraint());
    assert_eq!(catalog.status().unwrap(), before);
    assert!(!catalog
        .list_titles_asc()
        .unwrap()
        .contains(&"Orphan Title".to_string()));
}

// =============================================================================
// Connection lifecycle
// =============================================================================

#[test]
fn test_open_missing_file_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.db");

    let err = Catalog::open(&path).err().unwrap();
    assert!(matches!(err, CatalogError::Connection { .. }));
    assert!(!path.exists(), "open must not create the database");
}

#[test]
fn test_open_non_database_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    std::fs::write(&path, "not a sqlite database\n".repeat(64)).unwrap();

    let err = Catalog::open(&path).err().unwrap();
    assert!(matches!(err, CatalogError::Connection { .. }));
}

#[test]
fn test_writes_survive_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.db");

    let mut catalog = Catalog::create(&path).unwrap();
    let id = catalog
        .insert_author(&NewAuthor::new("Jane", "Smith"))
        .unwrap();
    catalog
        .insert_book(&NewBook::new(
            "1234567890",
            "Advanced Python Programming",
            1,
            "2024",
            id,
        ))
        .unwrap();
    catalog.close().unwrap();

    let catalog = Catalog::open(&path).unwrap();
    assert_eq!(catalog.list_authors_last_name_desc().unwrap(), vec!["Smith"]);
    assert_eq!(
        catalog.list_titles_asc().unwrap(),
        vec!["Advanced Python Programming"]
    );
    let status = catalog.status().unwrap();
    assert!(status.tables_exist);
    assert_eq!(status.link_count, 1);
}

#[test]
fn test_create_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.db");

    let mut catalog = Catalog::create(&path).unwrap();
    catalog.insert_author(&NewAuthor::new("Jane", "Smith")).unwrap();
    catalog.close().unwrap();

    let catalog = Catalog::create(&path).unwrap();
    assert_eq!(catalog.status().unwrap().author_count, 1);
}

#[test]
fn test_query_without_tables_is_query_error() {
    let conn = Connection::open_in_memory().unwrap();
    let catalog = Catalog::from_connection(conn).unwrap();
    let err = catalog.list_titles_asc().unwrap_err();
    assert!(matches!(err, CatalogError::Query(_)));
}

// =============================================================================
// Rendering results
// =============================================================================

#[test]
fn test_render_books_by_author() {
    let catalog = deitel_catalog();
    let books = catalog.list_books_by_author_last_name("Deitel").unwrap();
    let table = render_as_table(&books, &BookListing::COLUMNS).unwrap();

    assert_eq!(table.columns(), ["Title", "Copyright", "ISBN"]);
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.rows()[1][2], "0134743350");
}

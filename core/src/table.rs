//! Plain-text and Markdown table rendering for query results.
//!
//! [`render_as_table`] pairs a set of rows with column labels and returns a
//! [`Table`]. The table keeps the row/column structure for further use and
//! renders itself through [`Display`](std::fmt::Display) as an aligned text
//! table with a zero-based row index, or through [`Table::to_markdown`].
//!
//! # Example
//!
//! ```
//! use book_catalog_core::render_as_table;
//!
//! let rows = vec![("Advanced Python Programming", "2024", "1234567890")];
//! let table = render_as_table(&rows, &["Title", "Copyright", "ISBN"]).unwrap();
//!
//! assert_eq!(table.rows().len(), 1);
//! assert_eq!(table.columns(), ["Title", "Copyright", "ISBN"]);
//! println!("{table}");
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::{Author, BookListing, Title};

/// Errors raised while building a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A row has a different number of cells than there are columns.
    #[error("row {row} has {found} cells but {expected} columns were given")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A value that can be laid out as one table row.
pub trait TableRow {
    /// Returns the row's cells, left to right.
    fn cells(&self) -> Vec<String>;
}

impl<T: TableRow + ?Sized> TableRow for &T {
    fn cells(&self) -> Vec<String> {
        (**self).cells()
    }
}

impl<T: fmt::Display> TableRow for Vec<T> {
    fn cells(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: fmt::Display> TableRow for [T] {
    fn cells(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

macro_rules! tuple_row {
    ($($ty:ident $cell:ident),+) => {
        impl<$($ty: fmt::Display),+> TableRow for ($($ty,)+) {
            fn cells(&self) -> Vec<String> {
                let ($($cell,)+) = self;
                vec![$($cell.to_string()),+]
            }
        }
    };
}

tuple_row!(A a);
tuple_row!(A a, B b);
tuple_row!(A a, B b, C c);
tuple_row!(A a, B b, C c, D d);

impl TableRow for BookListing {
    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.copyright.clone(),
            self.isbn.clone(),
        ]
    }
}

impl TableRow for Author {
    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.first.clone(), self.last.clone()]
    }
}

impl TableRow for Title {
    fn cells(&self) -> Vec<String> {
        vec![
            self.isbn.clone(),
            self.title.clone(),
            self.edition.to_string(),
            self.copyright.clone(),
        ]
    }
}

/// Rows paired with their column labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Column labels, left to right.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as a GitHub-flavored Markdown table.
    ///
    /// Pipe characters inside cells are escaped.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&markdown_line(&self.columns));
        out.push_str(&markdown_line(
            &self.columns.iter().map(|_| "---".to_string()).collect::<Vec<_>>(),
        ));
        for row in &self.rows {
            out.push_str(&markdown_line(row));
        }
        out
    }

    /// Width of each column including the header, in characters.
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn markdown_line(cells: &[String]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |\n", escaped.join(" | "))
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let index_width = self.rows.len().saturating_sub(1).to_string().len();

        write!(f, "{:index_width$}", "")?;
        for (header, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {header:<width$}")?;
        }
        writeln!(f)?;

        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{i:<index_width$}")?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {cell:<width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds a [`Table`] from rows and column labels.
///
/// Every row must have exactly one cell per column. An empty row set is
/// valid and yields a table with headers only.
///
/// # Errors
///
/// Returns [`TableError::ColumnCountMismatch`] for the first row whose cell
/// count differs from `columns.len()`.
pub fn render_as_table<R: TableRow>(rows: &[R], columns: &[&str]) -> Result<Table, TableError> {
    let mut cells = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row = row.cells();
        if row.len() != columns.len() {
            return Err(TableError::ColumnCountMismatch {
                row: i,
                expected: columns.len(),
                found: row.len(),
            });
        }
        cells.push(row);
    }

    Ok(Table {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: cells,
    })
}

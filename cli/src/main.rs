use std::path::{Path, PathBuf};

use book_catalog_core::{
    Author, BookListing, NewAuthor, NewBook, Title, ValidationError, render_as_table,
    validate_new_author, validate_new_book,
};
use book_catalog_sqlite::Catalog;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// How query results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Markdown,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "book-catalog")]
#[command(about = "Query and extend a SQLite book catalog")]
struct Cli {
    /// Catalog database file path.
    #[arg(long, env = "BOOK_CATALOG_DB")]
    db: PathBuf,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
    /// Log verbosity (-v for debug, -vv for trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List authors' last names in descending order.
    Authors,
    /// List book titles in ascending order.
    Titles,
    /// List the books of authors with the given last name.
    Books(BooksArgs),
    /// Insert a new author.
    AddAuthor(AddAuthorArgs),
    /// Insert a new title and link it to an author.
    AddBook(AddBookArgs),
    /// Run the demonstration sequence: list, look up, insert author, insert book.
    Demo(DemoArgs),
    /// Create a new, empty catalog database.
    Init,
    /// Show table presence and row counts.
    Status,
}

#[derive(Debug, Args)]
struct BooksArgs {
    /// Exact author last name to match.
    #[arg(long)]
    last_name: String,
}

#[derive(Debug, Args)]
struct AddAuthorArgs {
    /// First name.
    #[arg(long)]
    first: String,
    /// Last name.
    #[arg(long)]
    last: String,
}

#[derive(Debug, Args)]
struct AddBookArgs {
    /// ISBN of the new title.
    #[arg(long)]
    isbn: String,
    /// Title text.
    #[arg(long)]
    title: String,
    /// Edition number.
    #[arg(long, default_value_t = 1)]
    edition: i64,
    /// Copyright year.
    #[arg(long)]
    copyright: String,
    /// Id of the author to credit.
    #[arg(long, conflicts_with = "author_last", required_unless_present = "author_last")]
    author_id: Option<i64>,
    /// Last name of the author to credit (first match by id).
    #[arg(long)]
    author_last: Option<String>,
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// Author whose books are listed.
    #[arg(long, default_value = "Deitel")]
    lookup_last_name: String,
    /// First name of the author to insert.
    #[arg(long, default_value = "Jane")]
    first: String,
    /// Last name of the author to insert.
    #[arg(long, default_value = "Smith")]
    last: String,
    /// ISBN of the title to insert.
    #[arg(long, default_value = "1234567890")]
    isbn: String,
    /// Title text to insert.
    #[arg(long, default_value = "Advanced Python Programming")]
    title: String,
    /// Edition of the title to insert.
    #[arg(long, default_value_t = 1)]
    edition: i64,
    /// Copyright year of the title to insert.
    #[arg(long, default_value = "2024")]
    copyright: String,
}

/// Everything the demonstration sequence read and wrote.
#[derive(Debug, Serialize)]
struct DemoReport {
    authors_desc: Vec<String>,
    titles_asc: Vec<String>,
    lookup_last_name: String,
    books: Vec<BookListing>,
    inserted_author: Author,
    inserted_book: Title,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    db: PathBuf,
    tables_exist: bool,
    authors: usize,
    titles: usize,
    author_isbn: usize,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(db = %cli.db.display(), command = ?cli.command, "starting");

    let format = cli.format;
    let result = match cli.command {
        Command::Authors => with_catalog(&cli.db, |c| run_authors(c, format)),
        Command::Titles => with_catalog(&cli.db, |c| run_titles(c, format)),
        Command::Books(args) => with_catalog(&cli.db, |c| run_books(c, format, args)),
        Command::AddAuthor(args) => with_catalog(&cli.db, |c| run_add_author(c, format, args)),
        Command::AddBook(args) => with_catalog(&cli.db, |c| run_add_book(c, format, args)),
        Command::Demo(args) => with_catalog(&cli.db, |c| run_demo(c, format, args)),
        Command::Status => with_catalog(&cli.db, |c| run_status(c, format)),
        Command::Init => run_init(&cli.db),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Target directive for our crates; `book_catalog` also matches
/// `book_catalog_sqlite` because targets match by prefix.
fn default_filter(level: &str) -> String {
    format!("book_catalog={level}")
}

/// Opens the catalog, runs one command against it, and closes it.
fn with_catalog<F>(db: &Path, run: F) -> Result<(), String>
where
    F: FnOnce(&mut Catalog) -> Result<(), String>,
{
    let mut catalog = Catalog::open(db).map_err(|e| e.to_string())?;
    run(&mut catalog)?;
    catalog.close().map_err(|e| e.to_string())
}

fn run_init(db: &Path) -> Result<(), String> {
    let catalog = Catalog::create(db).map_err(|e| e.to_string())?;
    catalog.close().map_err(|e| e.to_string())?;
    println!("Catalog ready at '{}'.", db.display());
    Ok(())
}

fn run_authors(catalog: &Catalog, format: OutputFormat) -> Result<(), String> {
    let names = catalog
        .list_authors_last_name_desc()
        .map_err(|e| format!("Failed to list authors: {e}"))?;
    print_names(&names, "Last", format)
}

fn run_titles(catalog: &Catalog, format: OutputFormat) -> Result<(), String> {
    let titles = catalog
        .list_titles_asc()
        .map_err(|e| format!("Failed to list titles: {e}"))?;
    print_names(&titles, "Title", format)
}

fn run_books(catalog: &Catalog, format: OutputFormat, args: BooksArgs) -> Result<(), String> {
    let books = catalog
        .list_books_by_author_last_name(&args.last_name)
        .map_err(|e| format!("Failed to list books by '{}': {e}", args.last_name))?;
    print_books(&books, format)
}

fn run_add_author(
    catalog: &mut Catalog,
    format: OutputFormat,
    args: AddAuthorArgs,
) -> Result<(), String> {
    let author = NewAuthor::new(&args.first, &args.last);
    check(validate_new_author(&author))?;
    let id = catalog
        .insert_author(&author)
        .map_err(|e| format!("Failed to insert author: {e}"))?;
    let inserted = Author::new(id, &author.first, &author.last);

    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(&inserted, format),
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("Inserted new author: {} (id {id})", inserted.full_name());
            Ok(())
        }
    }
}

fn run_add_book(
    catalog: &mut Catalog,
    format: OutputFormat,
    args: AddBookArgs,
) -> Result<(), String> {
    let author_id = match (args.author_id, args.author_last.as_deref()) {
        (Some(id), _) => id,
        (None, Some(last)) => catalog
            .find_author_id(last)
            .map_err(|e| format!("Failed to look up author '{last}': {e}"))?
            .ok_or_else(|| format!("No author with last name '{last}'"))?,
        (None, None) => return Err("Specify --author-id or --author-last".to_string()),
    };

    let book = NewBook::new(
        &args.isbn,
        &args.title,
        args.edition,
        &args.copyright,
        author_id,
    );
    check(validate_new_book(&book))?;
    catalog
        .insert_book(&book)
        .map_err(|e| format!("Failed to insert book '{}': {e}", book.isbn))?;

    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(&book, format),
        OutputFormat::Table | OutputFormat::Markdown => {
            println!(
                "Inserted new book: {} for author id {author_id}",
                book.title
            );
            Ok(())
        }
    }
}

fn run_demo(catalog: &mut Catalog, format: OutputFormat, args: DemoArgs) -> Result<(), String> {
    let authors_desc = catalog
        .list_authors_last_name_desc()
        .map_err(|e| format!("Failed to list authors: {e}"))?;
    let titles_asc = catalog
        .list_titles_asc()
        .map_err(|e| format!("Failed to list titles: {e}"))?;
    let books = catalog
        .list_books_by_author_last_name(&args.lookup_last_name)
        .map_err(|e| format!("Failed to list books by '{}': {e}", args.lookup_last_name))?;

    // Both records are checked before the author row is written.
    let author = NewAuthor::new(&args.first, &args.last);
    let mut book = NewBook::new(&args.isbn, &args.title, args.edition, &args.copyright, 0);
    check(validate_new_author(&author))?;
    check(validate_new_book(&book))?;

    let author_id = catalog
        .insert_author(&author)
        .map_err(|e| format!("Failed to insert author: {e}"))?;
    book.author_id = author_id;
    catalog
        .insert_book(&book)
        .map_err(|e| format!("Failed to insert book '{}': {e}", book.isbn))?;

    let report = DemoReport {
        authors_desc,
        titles_asc,
        lookup_last_name: args.lookup_last_name,
        books,
        inserted_author: Author::new(author_id, &author.first, &author.last),
        inserted_book: book.title(),
    };

    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(&report, format),
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("Authors' Last Names in Descending Order:");
            print_names(&report.authors_desc, "Last", format)?;
            println!("\nBook Titles in Ascending Order:");
            print_names(&report.titles_asc, "Title", format)?;
            println!("\nBooks by {}:", report.lookup_last_name);
            print_books(&report.books, format)?;
            println!(
                "\nInserted new author: {}",
                report.inserted_author.full_name()
            );
            println!(
                "\nInserted new book: {} for author {}",
                report.inserted_book.title,
                report.inserted_author.full_name()
            );
            Ok(())
        }
    }
}

fn run_status(catalog: &Catalog, format: OutputFormat) -> Result<(), String> {
    let status = catalog
        .status()
        .map_err(|e| format!("Failed to get catalog status: {e}"))?;
    let report = StatusReport {
        db: catalog.path().to_path_buf(),
        tables_exist: status.tables_exist,
        authors: status.author_count,
        titles: status.title_count,
        author_isbn: status.link_count,
    };

    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(&report, format),
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("Catalog Status:");
            println!(
                "  Tables exist: {}",
                if report.tables_exist { "yes" } else { "no" }
            );
            println!("  Authors: {}", report.authors);
            println!("  Titles: {}", report.titles);
            println!("  Author-ISBN links: {}", report.author_isbn);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Prints a single-column listing, one value per line in table format.
fn print_names(names: &[String], column: &str, format: OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Table => {
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        OutputFormat::Markdown => {
            let rows: Vec<(&str,)> = names.iter().map(|n| (n.as_str(),)).collect();
            let table = render_as_table(&rows, &[column]).map_err(|e| e.to_string())?;
            print!("{}", table.to_markdown());
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(&names, format),
    }
}

fn print_books(books: &[BookListing], format: OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Table => {
            let table = render_as_table(books, &BookListing::COLUMNS).map_err(|e| e.to_string())?;
            print!("{table}");
            Ok(())
        }
        OutputFormat::Markdown => {
            let table = render_as_table(books, &BookListing::COLUMNS).map_err(|e| e.to_string())?;
            print!("{}", table.to_markdown());
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(&books, format),
    }
}

fn print_serialized<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<(), String> {
    let out = match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))?
        }
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {e}"))?,
        OutputFormat::Table | OutputFormat::Markdown => {
            return Err(format!("{format:?} is not a serialization format"));
        }
    };
    println!("{}", out.trim_end());
    Ok(())
}

/// Turns a non-empty validation result into a single error message.
fn check(errors: Vec<ValidationError>) -> Result<(), String> {
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Err(format!("invalid input: {}", messages.join("; ")))
}

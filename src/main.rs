//! shelfkeeper CLI: keep track of the books you own and which ones you have read.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};

use shelfkeeper::{
    Genre, Library, LibraryConfig, NewBook, SearchField, Session, StatsVisualization, View,
    book::current_year,
};

/// Command-line arguments for the library manager
#[derive(Parser, Debug)]
#[command(name = "shelfkeeper", author, version, about = "Personal library manager", long_about = None)]
struct Cli {
    /// Library file to use, overriding the configuration file
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every book with its position.
    List,

    /// Add a book to the library.
    Add {
        /// Book title.
        #[arg(long)]
        title: String,

        /// Author name.
        #[arg(long)]
        author: String,

        /// Publication year (defaults to the current year).
        #[arg(long)]
        year: Option<i64>,

        /// Fiction, Non-Fiction, Science, Tech, Fantasy, History or Other.
        #[arg(long, default_value = "Other")]
        genre: String,

        /// Mark the book as already read.
        #[arg(long)]
        read: bool,
    },

    /// Remove the book at a position shown by `list`.
    Remove {
        /// Position of the book; positions outside the library are ignored.
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Find books whose title, author or genre contains a term.
    Search {
        /// Text to look for, case-insensitive.
        term: String,

        /// Field to search.
        #[arg(long, value_enum, default_value_t = FieldArg::Title)]
        by: FieldArg,
    },

    /// Show reading statistics and charts.
    Stats {
        /// Print the raw figures as JSON.
        #[arg(long)]
        json: bool,

        /// Append a markdown table of every figure.
        #[arg(long)]
        table: bool,

        /// Also write the report to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Searchable fields as accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
enum FieldArg {
    /// Book title
    Title,
    /// Author name
    Author,
    /// Genre label
    Genre,
}

impl From<FieldArg> for SearchField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Title => Self::Title,
            FieldArg::Author => Self::Author,
            FieldArg::Genre => Self::Genre,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = LibraryConfig::load(cli.config.as_deref())?;
    if let Some(data_file) = cli.data_file {
        config = config.with_data_file(data_file);
    }

    let mut session = Session::new(Library::open(&config)?);

    match cli.command {
        Commands::List => {
            session.navigate(View::Library);
            print_heading(&session);
            let listing = StatsVisualization::render_listing(session.library().records());
            if session.library().is_empty() {
                print!("{}", listing.yellow());
            } else {
                print!("{listing}");
            }
        }
        Commands::Add { title, author, year, genre, read } => {
            session.navigate(View::AddBook);
            let book = NewBook {
                title,
                author,
                publication_year: year.unwrap_or_else(current_year),
                genre: Genre::parse(&genre),
                read_status: read,
            };
            let position = session.add_book(book)?;
            if session.take_book_added() {
                println!("{} (position {position})", "Book added!".green().bold());
            }
        }
        Commands::Remove { index } => {
            session.navigate(View::Library);
            match session.remove_book(index)? {
                Some(book) => {
                    println!("{} {} by {}", "Removed".green().bold(), book.title, book.author);
                }
                None => println!("{}", format!("No book at position {index}.").yellow()),
            }
        }
        Commands::Search { term, by } => {
            session.navigate(View::SearchBooks);
            print_heading(&session);
            let results = session.search(&term, by.into());
            if results.is_empty() {
                println!("{}", "No results found.".yellow());
            }
            for book in results {
                println!("{}", StatsVisualization::render_search_line(book));
            }
        }
        Commands::Stats { json, table, output } => {
            session.navigate(View::Statistics);
            let stats = session.stats();

            if json {
                println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
                return Ok(());
            }

            let mut report = StatsVisualization::render_report(&stats);
            if table {
                report.push('\n');
                report.push_str(&StatsVisualization::stats_table(&stats));
            }

            print_heading(&session);
            print!("{report}");

            if let Some(path) = output {
                StatsVisualization::save_report_to_file(&report, &path).into_diagnostic()?;
                println!("{} {}", "Report written to".green(), path.display());
            }
        }
    }

    Ok(())
}

/// Print the title of the current view
fn print_heading(session: &Session) {
    println!("{}\n", session.current_view().label().blue().bold());
}

//! Error types for the library store.
//!
//! Validation problems (bad input to `add`) and persistence problems (the
//! library file could not be read, parsed or written) are kept apart so a
//! caller can tell "fix your input" from "fix your disk".

use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error for every fallible library operation
#[derive(Debug, Error, Diagnostic)]
pub enum LibraryError {
    /// The book submitted to `add` was rejected
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    /// The library file could not be read or written
    #[error(transparent)]
    #[diagnostic(transparent)]
    Persistence(#[from] PersistenceError),

    /// A strict removal pointed past the end of the library
    #[error("no book at position {index} (library holds {len})")]
    #[diagnostic(
        code(shelfkeeper::not_found),
        help("Positions start at 0. Run `shelfkeeper list` to see the current positions.")
    )]
    NotFound {
        /// Requested position
        index: usize,
        /// Number of records at the time of the call
        len: usize,
    },

    /// The configuration file could not be used
    #[error("invalid configuration in {path}: {message}")]
    #[diagnostic(code(shelfkeeper::config))]
    Config {
        /// Path of the configuration file
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

/// Reasons a new book is refused
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    /// Title missing or blank
    #[error("a book needs a title")]
    #[diagnostic(code(shelfkeeper::validation::empty_title))]
    EmptyTitle,

    /// Author missing or blank
    #[error("a book needs an author")]
    #[diagnostic(code(shelfkeeper::validation::empty_author))]
    EmptyAuthor,

    /// Publication year outside the accepted window
    #[error("publication year {year} is outside {min}..={max}")]
    #[diagnostic(
        code(shelfkeeper::validation::year),
        help("The year must lie between the configured minimum and the current year.")
    )]
    YearOutOfRange {
        /// Year that was submitted
        year: i64,
        /// Earliest accepted year
        min: i64,
        /// Latest accepted year
        max: i64,
    },

    /// Genre label not in the fixed set
    #[error("unknown genre `{0}`")]
    #[diagnostic(
        code(shelfkeeper::validation::genre),
        help("Use one of: Fiction, Non-Fiction, Science, Tech, Fantasy, History, Other.")
    )]
    UnknownGenre(String),
}

/// Failures touching the persisted library file
#[derive(Debug, Error, Diagnostic)]
pub enum PersistenceError {
    /// The file exists but could not be read
    #[error("failed to read library file {path}")]
    #[diagnostic(code(shelfkeeper::persistence::read))]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file could not be created or written
    #[error("failed to write library file {path}")]
    #[diagnostic(code(shelfkeeper::persistence::write))]
    Write {
        /// File that was written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file content is not a list of book records
    #[error("library file {path} is malformed")]
    #[diagnostic(
        code(shelfkeeper::persistence::malformed),
        help("The file must hold a JSON array of book objects. Fix or move it aside to start fresh.")
    )]
    Malformed {
        /// File that was parsed
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// The records could not be serialized
    #[error("failed to encode library")]
    #[diagnostic(code(shelfkeeper::persistence::encode))]
    Encode(#[source] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LibraryError>;

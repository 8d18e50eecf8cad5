//! Personal book library: an ordered list of book records kept in a JSON
//! file, with substring search and reading statistics.
//!
//! The crate is the engine behind a front end. The front end loads a
//! [`Library`] (usually through a [`Session`]), dispatches user actions to
//! it and renders the plain data it returns.

pub mod book;
pub mod config;
pub mod error;
pub mod events;
pub mod observers;
pub mod persistence;
pub mod query;
pub mod session;
pub mod stats;
pub mod system;
pub mod visualization;

pub use book::{BookRecord, Genre, NewBook};
pub use config::LibraryConfig;
pub use error::{LibraryError, PersistenceError, ValidationError};
pub use events::LibraryEvent;
pub use query::SearchField;
pub use session::{Session, View};
pub use stats::Stats;
pub use system::Library;
pub use visualization::StatsVisualization;

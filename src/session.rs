//! Application state for a front end driving the library.
//!
//! A [`Session`] owns the [`Library`] together with the few transient flags
//! a user interface needs between interactions. The front end creates it,
//! passes it to each handler, and drops it on exit.

use std::{fmt, str::FromStr};

use crate::{
    book::{BookRecord, NewBook},
    error::Result,
    query::SearchField,
    stats::Stats,
    system::Library,
};

/// The screen the user is looking at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    /// The full listing
    #[default]
    Library,
    /// The add-book form
    AddBook,
    /// The search form and its results
    SearchBooks,
    /// Aggregate figures and charts
    Statistics,
}

impl View {
    /// Every view, in navigation order
    pub const ALL: [Self; 4] = [Self::Library, Self::AddBook, Self::SearchBooks, Self::Statistics];

    /// Navigation label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Library => "View Library",
            Self::AddBook => "Add Book",
            Self::SearchBooks => "Search Books",
            Self::Statistics => "Library Statistics",
        }
    }

    /// Snake-case key derived from the label, e.g. `view_library`
    #[must_use]
    pub fn key(self) -> String {
        self.label().to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|view| view.key() == wanted)
            .ok_or_else(|| format!("unknown view `{s}`"))
    }
}

/// The library plus transient interface state
#[derive(Debug)]
pub struct Session {
    /// The record store
    library: Library,
    /// Result of the last non-empty search
    search_results: Vec<BookRecord>,
    /// Set by a successful add until read with `take_book_added`
    book_added: bool,
    /// Set by an actual removal until read with `take_book_removed`
    book_removed: bool,
    /// Screen currently shown
    current_view: View,
}

impl Session {
    /// Start a session over an already loaded library
    #[must_use]
    pub fn new(library: Library) -> Self {
        Self {
            library,
            search_results: Vec::new(),
            book_added: false,
            book_removed: false,
            current_view: View::default(),
        }
    }

    /// The underlying library
    #[must_use]
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// End the session, handing back the library
    #[must_use]
    pub fn into_library(self) -> Library {
        self.library
    }

    /// Screen currently shown
    #[must_use]
    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Switch to another screen
    pub fn navigate(&mut self, view: View) {
        self.current_view = view;
    }

    /// Add a book and raise the `book_added` flag
    ///
    /// # Errors
    ///
    /// Propagates validation and persistence errors from [`Library::add`];
    /// the flag is left untouched in that case.
    pub fn add_book(&mut self, book: NewBook) -> Result<usize> {
        let position = self.library.add(book)?;
        self.book_added = true;
        Ok(position)
    }

    /// Remove the book at a possibly stale or negative position
    ///
    /// Positions outside the library are ignored. The `book_removed` flag is
    /// raised only when a record was actually deleted.
    ///
    /// # Errors
    ///
    /// Propagates persistence errors from [`Library::remove`].
    pub fn remove_book(&mut self, index: i64) -> Result<Option<BookRecord>> {
        let Ok(index) = usize::try_from(index) else {
            return Ok(None);
        };
        let removed = self.library.remove(index)?;
        if removed.is_some() {
            self.book_removed = true;
        }
        Ok(removed)
    }

    /// Run a search and keep its results; an empty term clears them instead
    pub fn search(&mut self, term: &str, field: SearchField) -> &[BookRecord] {
        self.search_results =
            if term.is_empty() { Vec::new() } else { self.library.search(term, field) };
        &self.search_results
    }

    /// Results of the last search
    #[must_use]
    pub fn search_results(&self) -> &[BookRecord] {
        &self.search_results
    }

    /// Aggregate figures for the current library
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.library.stats()
    }

    /// Read and clear the one-shot "book added" flag
    pub fn take_book_added(&mut self) -> bool {
        std::mem::take(&mut self.book_added)
    }

    /// Read and clear the one-shot "book removed" flag
    pub fn take_book_removed(&mut self) -> bool {
        std::mem::take(&mut self.book_removed)
    }
}

use std::fmt;

use tracing::warn;

use crate::{
    book::{self, BookRecord, DEFAULT_MIN_YEAR, NewBook},
    config::LibraryConfig,
    error::{LibraryError, Result},
    events::LibraryEvent,
    observers::{ChangeLogger, LibraryObserver},
    persistence::{JsonFileStorage, Storage},
    query::{self, SearchField},
    stats::{self, Stats},
};

/// Ordered collection of book records mirrored to a [`Storage`]
///
/// Every mutation is saved before it returns. If the save fails the
/// mutation is undone, so memory and storage never disagree.
pub struct Library {
    /// Records in insertion order
    records: Vec<BookRecord>,
    /// Where the records are persisted
    storage: Box<dyn Storage>,
    /// Registered change observers
    observers: Vec<Box<dyn LibraryObserver>>,
    /// Earliest publication year accepted by `add`
    min_year: i64,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("records", &self.records)
            .field("storage", &self.storage.describe())
            .field("observers_count", &self.observers.len())
            .field("min_year", &self.min_year)
            .finish()
    }
}

impl Library {
    /// Load the library held by `storage`, with the standard change logger attached
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Persistence` if the stored data exists but
    /// cannot be read or parsed. Missing data is an empty library.
    pub fn load(storage: Box<dyn Storage>) -> Result<Self> {
        let records = storage.load()?;
        let mut library =
            Self { records, storage, observers: Vec::new(), min_year: DEFAULT_MIN_YEAR };
        library.register_observer(Box::new(ChangeLogger));
        Ok(library)
    }

    /// Open the JSON library file named by `config`
    ///
    /// # Errors
    ///
    /// See [`Library::load`].
    pub fn open(config: &LibraryConfig) -> Result<Self> {
        let mut library = Self::load(Box::new(JsonFileStorage::new(config.data_file.clone())))?;
        library.min_year = config.min_year;
        Ok(library)
    }

    /// Register an observer to be notified of persisted changes
    pub fn register_observer(&mut self, observer: Box<dyn LibraryObserver>) {
        self.observers.push(observer);
    }

    /// Change the earliest publication year accepted by `add`
    pub fn set_min_year(&mut self, min_year: i64) {
        self.min_year = min_year;
    }

    /// All records in library order
    #[must_use]
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the library holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BookRecord> {
        self.records.get(index)
    }

    /// Write the current records to storage
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Persistence` if the records cannot be written.
    pub fn save(&mut self) -> Result<()> {
        self.storage.save(&self.records)
    }

    /// Validate `submission`, stamp it with the current time, append it and save
    ///
    /// Returns the position of the new record.
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Validation` for a blank title or author, a
    /// year outside the accepted window or an unlisted genre, and a
    /// `LibraryError::Persistence` if saving fails (the book is not kept).
    pub fn add(&mut self, submission: NewBook) -> Result<usize> {
        submission.validate(self.min_year, book::current_year())?;
        self.push(submission.into_record(book::timestamp_now()))
    }

    /// Append an already stamped record and save
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Persistence` if saving fails; the record is not kept.
    pub fn push(&mut self, record: BookRecord) -> Result<usize> {
        let position = self.records.len();
        self.records.push(record);

        if let Err(e) = self.storage.save(&self.records) {
            self.records.pop();
            return Err(e);
        }

        self.notify(position);
        Ok(position)
    }

    /// Delete the record at `index` and save
    ///
    /// An index past the end is ignored and yields `Ok(None)`. Records after
    /// `index` move down one position, so positions taken before the call
    /// no longer refer to the same books.
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Persistence` if saving fails; the record is restored.
    pub fn remove(&mut self, index: usize) -> Result<Option<BookRecord>> {
        if index >= self.records.len() {
            warn!(index, len = self.records.len(), "ignoring removal of missing position");
            return Ok(None);
        }

        let record = self.records.remove(index);
        if let Err(e) = self.storage.save(&self.records) {
            self.records.insert(index, record);
            return Err(e);
        }

        let event = LibraryEvent::Removed { position: index, record };
        self.broadcast(&event);
        Ok(Some(event.record().clone()))
    }

    /// Like [`Library::remove`], but a missing position is an error
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` for an index past the end, and a
    /// `LibraryError::Persistence` if saving fails.
    pub fn try_remove(&mut self, index: usize) -> Result<BookRecord> {
        let len = self.records.len();
        self.remove(index)?.ok_or(LibraryError::NotFound { index, len })
    }

    /// Records whose `field` contains `term`, ignoring case
    #[must_use]
    pub fn search(&self, term: &str, field: SearchField) -> Vec<BookRecord> {
        query::search(&self.records, term, field)
    }

    /// Aggregate figures for the current records
    #[must_use]
    pub fn stats(&self) -> Stats {
        stats::stats(&self.records)
    }

    /// Tell observers about the record just appended at `position`
    fn notify(&self, position: usize) {
        if let Some(record) = self.records.get(position) {
            self.broadcast(&LibraryEvent::Added { position, record: record.clone() });
        }
    }

    /// Send `event` to every observer
    fn broadcast(&self, event: &LibraryEvent) {
        for observer in &self.observers {
            observer.on_change(event, self.records.len());
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let read = self.records.iter().filter(|r| r.read_status).count();
        write!(f, "{} books ({read} read)", self.records.len())
    }
}

#[cfg(test)]
mod tests;

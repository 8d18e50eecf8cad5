//! Where the library lives between sessions.
//!
//! The whole record list is written on every save; there is no incremental
//! update and no locking, so only one session may use a file at a time.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    book::BookRecord,
    error::{PersistenceError, Result},
};

/// Backing store for the record list
pub trait Storage {
    /// Read the persisted records; a store that was never written is empty
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if the data exists but cannot be read or parsed.
    fn load(&self) -> Result<Vec<BookRecord>>;

    /// Replace the persisted records with `records`
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if the records cannot be encoded or written.
    fn save(&mut self, records: &[BookRecord]) -> Result<()>;

    /// Short human-readable description of the location, for logs
    fn describe(&self) -> String;
}

/// Serialize records in the on-disk layout
///
/// # Errors
///
/// Returns `PersistenceError::Encode` if serialization fails.
pub fn encode(records: &[BookRecord]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(records).map_err(PersistenceError::Encode)?;
    out.push('\n');
    Ok(out)
}

/// Parse the on-disk layout; `origin` is only used for error messages
///
/// # Errors
///
/// Returns `PersistenceError::Malformed` if `contents` is not a JSON array of records.
pub fn decode(contents: &str, origin: &Path) -> Result<Vec<BookRecord>> {
    serde_json::from_str(contents).map_err(|source| {
        PersistenceError::Malformed { path: origin.to_path_buf(), source }.into()
    })
}

/// The library as a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    /// Location of the file
    path: PathBuf,
}

impl JsonFileStorage {
    /// Use the file at `path`; it need not exist yet
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the library file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Vec<BookRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no library file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PersistenceError::Read { path: self.path.clone(), source }.into());
            }
        };

        let records = decode(&contents, &self.path)?;
        debug!(path = %self.path.display(), count = records.len(), "library loaded");
        Ok(records)
    }

    fn save(&mut self, records: &[BookRecord]) -> Result<()> {
        let encoded = encode(records)?;
        let write_error = |source| PersistenceError::Write { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let mut file = File::create(&self.path).map_err(write_error)?;
        file.write_all(encoded.as_bytes()).map_err(write_error)?;

        debug!(path = %self.path.display(), count = records.len(), "library saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the encoded library in memory; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    /// Last saved document, `None` until the first save
    contents: Option<String>,
}

impl MemoryStorage {
    /// An empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `contents`, as if read from disk
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self { contents: Some(contents.into()) }
    }

    /// The document as last saved
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<BookRecord>> {
        match &self.contents {
            Some(contents) => decode(contents, Path::new("<memory>")),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, records: &[BookRecord]) -> Result<()> {
        self.contents = Some(encode(records)?);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{book::Genre, error::LibraryError};

    fn dune() -> BookRecord {
        BookRecord {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            publication_year: 1965,
            genre: Genre::Science,
            read_status: true,
            added_date: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn unwritten_memory_store_is_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.contents().is_none());
        assert!(matches!(storage.load(), Ok(records) if records.is_empty()));
    }

    #[test]
    fn memory_store_keeps_the_encoded_document() {
        let mut storage = MemoryStorage::new();
        assert!(storage.save(&[dune()]).is_ok());

        let contents = storage.contents().unwrap_or_default();
        assert!(contents.starts_with('['));
        assert!(contents.contains("\"publication_year\": 1965"));
        assert!(matches!(storage.load(), Ok(records) if records == vec![dune()]));
    }

    #[test]
    fn empty_library_encodes_as_empty_list() {
        assert!(matches!(encode(&[]), Ok(ref text) if text == "[]\n"));
    }

    #[test]
    fn malformed_document_is_reported() {
        let storage = MemoryStorage::with_contents("[{\"title\": \"Dune\"}]");
        assert!(matches!(
            storage.load(),
            Err(LibraryError::Persistence(PersistenceError::Malformed { .. }))
        ));
    }
}

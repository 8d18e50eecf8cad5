#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

use crate::{
    book::{BookRecord, Genre, NewBook},
    error::{LibraryError, PersistenceError, Result},
    events::LibraryEvent,
    observers::LibraryObserver,
    persistence::{MemoryStorage, Storage},
    query::SearchField,
    system::Library,
};

/// Storage that loads fixed records and refuses every write
#[derive(Debug, Default)]
struct ReadOnlyStorage(Vec<BookRecord>);

impl Storage for ReadOnlyStorage {
    fn load(&self) -> Result<Vec<BookRecord>> {
        Ok(self.0.clone())
    }

    fn save(&mut self, _records: &[BookRecord]) -> Result<()> {
        Err(PersistenceError::Write {
            path: "read-only".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        }
        .into())
    }

    fn describe(&self) -> String {
        "read-only".to_string()
    }
}

/// Observer that remembers every event it sees
#[derive(Debug, Default, Clone)]
struct Recorder(Rc<RefCell<Vec<LibraryEvent>>>);

impl LibraryObserver for Recorder {
    fn on_change(&self, event: &LibraryEvent, _len: usize) {
        self.0.borrow_mut().push(event.clone());
    }
}

/// Helper function to set up an empty in-memory library
#[allow(clippy::expect_used)]
fn empty_library() -> Library {
    Library::load(Box::new(MemoryStorage::new())).expect("Memory storage should load")
}

fn submission(title: &str, author: &str, year: i64, genre: Genre, read: bool) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: author.to_string(),
        publication_year: year,
        genre,
        read_status: read,
    }
}

/// Library holding Dune and Emma, in that order
#[allow(clippy::expect_used)]
fn two_books() -> Library {
    let mut library = empty_library();
    library
        .add(submission("Dune", "Herbert", 1965, Genre::Science, true))
        .expect("Dune should be accepted");
    library
        .add(submission("Emma", "Austen", 1815, Genre::Fiction, false))
        .expect("Emma should be accepted");
    library
}

#[test]
fn test_new_library_is_empty() {
    let library = empty_library();
    assert!(library.is_empty());
    assert_eq!(library.to_string(), "0 books (0 read)");
}

#[test]
fn test_add_appends_in_order() {
    let library = two_books();
    let titles: Vec<&str> = library.records().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Emma"]);
    assert_eq!(library.get(1).map(|r| r.genre.clone()), Some(Genre::Fiction));
    assert!(library.records().iter().all(|r| r.added_at().is_some()));
}

#[test]
fn test_duplicates_are_allowed() {
    let mut library = two_books();
    assert!(library.add(submission("Dune", "Herbert", 1965, Genre::Science, true)).is_ok());
    assert_eq!(library.len(), 3);
}

#[test]
fn test_add_rejects_blank_title() {
    let mut library = two_books();
    let result = library.add(submission("", "Herbert", 1965, Genre::Science, true));
    assert!(matches!(result, Err(LibraryError::Validation(_))));
    assert_eq!(library.len(), 2);
}

#[test]
fn test_add_respects_configured_min_year() {
    let mut library = empty_library();
    library.set_min_year(1900);
    let result = library.add(submission("Emma", "Austen", 1815, Genre::Fiction, false));
    assert!(matches!(result, Err(LibraryError::Validation(_))));
}

#[test]
#[allow(clippy::expect_used)]
fn test_remove_just_added_restores_library() {
    let mut library = two_books();
    let before = library.records().to_vec();

    let position = library
        .add(submission("Odes", "Keats", 1819, Genre::Other, false))
        .expect("Odes should be accepted");
    assert_eq!(position, before.len());

    let removed = library.remove(before.len()).expect("Removal should persist");
    assert_eq!(removed.map(|r| r.title), Some("Odes".to_string()));
    assert_eq!(library.records(), before.as_slice());
}

#[test]
fn test_remove_shifts_later_records() {
    let mut library = two_books();
    assert!(matches!(library.remove(0), Ok(Some(_))));
    assert_eq!(library.get(0).map(|r| r.title.as_str()), Some("Emma"));
}

#[test]
fn test_out_of_range_remove_is_ignored() {
    let mut library = two_books();
    let before = library.records().to_vec();

    assert!(matches!(library.remove(library.len()), Ok(None)));
    assert!(matches!(library.remove(usize::MAX), Ok(None)));
    assert_eq!(library.records(), before.as_slice());
}

#[test]
fn test_try_remove_reports_missing_position() {
    let mut library = two_books();
    assert!(matches!(library.try_remove(5), Err(LibraryError::NotFound { index: 5, len: 2 })));
    assert!(matches!(library.try_remove(1), Ok(ref r) if r.title == "Emma"));
}

#[test]
fn test_search_and_stats_read_the_current_records() {
    let library = two_books();

    let hits = library.search("du", SearchField::Title);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.first().map(|r| r.title.as_str()), Some("Dune"));
    assert!(library.search("zz", SearchField::Author).is_empty());

    let stats = library.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.read_count, 1);
    assert!((stats.percent_read - 50.0).abs() < f64::EPSILON);
    assert_eq!(stats.by_decade.get(&1960), Some(&1));
    assert_eq!(stats.by_decade.get(&1810), Some(&1));
}

#[test]
#[allow(clippy::expect_used)]
fn test_stored_extreme_years_load_and_aggregate() {
    let document = r#"[
  {"title": "Clay Tablet", "author": "Unknown", "publication_year": -2147483648, "genre": "History", "read_status": false, "added_date": "2024-01-01 00:00:00"},
  {"title": "Far Future", "author": "Unknown", "publication_year": 3000000000, "genre": "Science", "read_status": true, "added_date": "2024-01-01 00:00:00"}
]"#;
    let library = Library::load(Box::new(MemoryStorage::with_contents(document)))
        .expect("Extreme years should load");

    assert_eq!(library.get(1).map(|r| r.publication_year), Some(3_000_000_000));

    let stats = library.stats();
    assert_eq!(stats.by_decade.get(&-2_147_483_650), Some(&1));
    assert_eq!(stats.by_decade.get(&3_000_000_000), Some(&1));
    assert!((stats.percent_read - 50.0).abs() < f64::EPSILON);
}

#[test]
#[allow(clippy::expect_used)]
fn test_failed_save_rolls_back_add() {
    let mut library =
        Library::load(Box::new(ReadOnlyStorage::default())).expect("Read-only storage should load");
    let result = library.add(submission("Dune", "Herbert", 1965, Genre::Science, true));
    assert!(matches!(result, Err(LibraryError::Persistence(PersistenceError::Write { .. }))));
    assert!(library.is_empty());
}

#[test]
#[allow(clippy::expect_used)]
fn test_failed_save_rolls_back_remove() {
    let record = BookRecord {
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        publication_year: 1965,
        genre: Genre::Science,
        read_status: true,
        added_date: "2024-01-01 00:00:00".to_string(),
    };
    let mut library = Library::load(Box::new(ReadOnlyStorage(vec![record.clone()])))
        .expect("Read-only storage should load");

    assert!(library.remove(0).is_err());
    assert_eq!(library.records(), std::slice::from_ref(&record));
}

#[test]
fn test_observers_see_persisted_changes() {
    let recorder = Recorder::default();
    let mut library = empty_library();
    library.register_observer(Box::new(recorder.clone()));

    assert!(library.add(submission("Dune", "Herbert", 1965, Genre::Science, true)).is_ok());
    assert!(matches!(library.remove(0), Ok(Some(_))));
    assert!(matches!(library.remove(0), Ok(None)));

    let events = recorder.0.borrow();
    assert_eq!(events.len(), 2);
    assert!(matches!(events.first(), Some(LibraryEvent::Added { position: 0, .. })));
    assert!(matches!(events.get(1), Some(LibraryEvent::Removed { position: 0, .. })));
    assert!(events.iter().all(|e| e.record().title == "Dune"));
}

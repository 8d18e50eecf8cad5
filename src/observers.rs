use tracing::info;

use crate::events::LibraryEvent;

/// Trait for library change observation
pub trait LibraryObserver {
    /// Called after a mutation has been persisted
    fn on_change(&self, event: &LibraryEvent, len: usize);
}

/// Logs every persisted change
#[derive(Debug)]
pub struct ChangeLogger;

impl LibraryObserver for ChangeLogger {
    fn on_change(&self, event: &LibraryEvent, len: usize) {
        match event {
            LibraryEvent::Added { position, record } => {
                info!(position, title = %record.title, author = %record.author, len, "book added");
            }
            LibraryEvent::Removed { position, record } => {
                info!(position, title = %record.title, author = %record.author, len, "book removed");
            }
        }
    }
}

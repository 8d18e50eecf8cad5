use serde::{Deserialize, Serialize};

use crate::book::BookRecord;

/// Mutations applied to the library, reported to observers once persisted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum LibraryEvent {
    /// A record was appended at `position`
    Added {
        /// Position of the new record
        position: usize,
        /// The record that was appended
        record: BookRecord,
    },
    /// The record at `position` was deleted; later records moved down by one
    Removed {
        /// Position the record occupied
        position: usize,
        /// The record that was deleted
        record: BookRecord,
    },
}

impl LibraryEvent {
    /// The record the event is about
    #[must_use]
    pub fn record(&self) -> &BookRecord {
        match self {
            Self::Added { record, .. } | Self::Removed { record, .. } => record,
        }
    }
}

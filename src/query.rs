//! Substring search over the library.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::book::BookRecord;

/// Text field a search looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Match against the title
    #[default]
    Title,
    /// Match against the author
    Author,
    /// Match against the genre label
    Genre,
}

impl SearchField {
    /// Text of this field in `record`
    #[must_use]
    pub fn value_of(self, record: &BookRecord) -> &str {
        match self {
            Self::Title => &record.title,
            Self::Author => &record.author,
            Self::Genre => record.genre.label(),
        }
    }

    /// Name used on the command line and in the library file
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Genre => "genre",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "genre" => Ok(Self::Genre),
            other => Err(format!("cannot search by `{other}`; use title, author or genre")),
        }
    }
}

/// Records whose `field` contains `term`, ignoring case, in library order
///
/// An empty term matches every record.
#[must_use]
pub fn search(records: &[BookRecord], term: &str, field: SearchField) -> Vec<BookRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| field.value_of(record).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

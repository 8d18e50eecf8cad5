use std::fmt;

use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Format of the `added_date` field in the library file
pub const ADDED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Earliest publication year accepted for new books by default
pub const DEFAULT_MIN_YEAR: i64 = 1000;

/// Genre label attached to a book
///
/// New books must use one of the fixed labels. Records loaded from disk may
/// carry any string, which is kept verbatim as [`Genre::Unlisted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Genre {
    /// Fiction
    Fiction,
    /// Non-Fiction
    NonFiction,
    /// Science
    Science,
    /// Tech
    Tech,
    /// Fantasy
    Fantasy,
    /// History
    History,
    /// Anything else the reader files as "Other"
    #[default]
    Other,
    /// A label outside the fixed set, found in persisted data
    Unlisted(String),
}

impl Genre {
    /// The fixed labels offered for new books, in menu order
    pub const LISTED: [Self; 7] = [
        Self::Fiction,
        Self::NonFiction,
        Self::Science,
        Self::Tech,
        Self::Fantasy,
        Self::History,
        Self::Other,
    ];

    /// Label as written to the library file
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
            Self::Science => "Science",
            Self::Tech => "Tech",
            Self::Fantasy => "Fantasy",
            Self::History => "History",
            Self::Other => "Other",
            Self::Unlisted(label) => label,
        }
    }

    /// Parse user input, ignoring case and surrounding whitespace
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        Self::LISTED
            .iter()
            .find(|genre| genre.label().eq_ignore_ascii_case(input))
            .cloned()
            .unwrap_or_else(|| Self::Unlisted(input.to_string()))
    }

    /// Whether this is one of the fixed labels
    #[must_use]
    pub fn is_listed(&self) -> bool {
        !matches!(self, Self::Unlisted(_))
    }
}

impl From<String> for Genre {
    fn from(label: String) -> Self {
        // Exact match only, so unknown spellings survive a load/save cycle.
        Self::LISTED.iter().find(|genre| genre.label() == label).cloned().unwrap_or(Self::Unlisted(label))
    }
}

impl From<Genre> for String {
    fn from(genre: Genre) -> Self {
        match genre {
            Genre::Unlisted(label) => label,
            listed => listed.label().to_string(),
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry
///
/// Field names are the on-disk names and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookRecord {
    /// Book title
    pub title: String,
    /// Author name
    pub author: String,
    /// Year of publication
    pub publication_year: i64,
    /// Genre label
    pub genre: Genre,
    /// `true` once the book has been read
    pub read_status: bool,
    /// Local time the record was created, see [`ADDED_DATE_FORMAT`]
    pub added_date: String,
}

impl BookRecord {
    /// Parse `added_date`, if it is in the expected format
    #[must_use]
    pub fn added_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.added_date, ADDED_DATE_FORMAT).ok()
    }

    /// "Read" or "Unread"
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.read_status { "Read" } else { "Unread" }
    }
}

/// A book as submitted for addition, before it gets its timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    /// Book title
    pub title: String,
    /// Author name
    pub author: String,
    /// Year of publication
    pub publication_year: i64,
    /// Genre label
    pub genre: Genre,
    /// Whether the book has been read
    pub read_status: bool,
}

impl NewBook {
    /// Check the submission against the accepted ranges
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: blank title, blank
    /// author, year outside `min_year..=max_year`, or an unlisted genre.
    pub fn validate(&self, min_year: i64, max_year: i64) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        if !(min_year..=max_year).contains(&self.publication_year) {
            return Err(ValidationError::YearOutOfRange {
                year: self.publication_year,
                min: min_year,
                max: max_year,
            });
        }
        if !self.genre.is_listed() {
            return Err(ValidationError::UnknownGenre(self.genre.label().to_string()));
        }
        Ok(())
    }

    /// Turn the submission into a record stamped with `added_date`
    ///
    /// Title and author are kept exactly as typed.
    #[must_use]
    pub fn into_record(self, added_date: String) -> BookRecord {
        BookRecord {
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            genre: self.genre,
            read_status: self.read_status,
            added_date,
        }
    }
}

/// Current local time in [`ADDED_DATE_FORMAT`]
#[must_use]
pub fn timestamp_now() -> String {
    Local::now().format(ADDED_DATE_FORMAT).to_string()
}

/// Current calendar year in local time
#[must_use]
pub fn current_year() -> i64 {
    i64::from(Local::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            publication_year: 1965,
            genre: Genre::Science,
            read_status: true,
        }
    }

    #[test]
    fn genre_labels_round_trip_through_json() {
        let json = serde_json::to_string(&Genre::NonFiction).unwrap_or_default();
        assert_eq!(json, "\"Non-Fiction\"");

        let parsed: Genre = serde_json::from_str("\"Poetry\"").unwrap_or_default();
        assert_eq!(parsed, Genre::Unlisted("Poetry".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap_or_default(), "\"Poetry\"");
    }

    #[test]
    fn loaded_genre_keeps_unusual_case() {
        assert_eq!(Genre::from("fiction".to_string()), Genre::Unlisted("fiction".to_string()));
        assert_eq!(Genre::parse(" fiction "), Genre::Fiction);
        assert_eq!(Genre::parse("non-fiction"), Genre::NonFiction);
    }

    #[test]
    fn validation_rejects_blank_fields() {
        let mut book = submission();
        book.title = "   ".to_string();
        assert_eq!(book.validate(1000, 2024), Err(ValidationError::EmptyTitle));

        let mut book = submission();
        book.author = String::new();
        assert_eq!(book.validate(1000, 2024), Err(ValidationError::EmptyAuthor));
    }

    #[test]
    fn validation_checks_year_window_and_genre() {
        let mut book = submission();
        book.publication_year = 999;
        assert!(matches!(
            book.validate(1000, 2024),
            Err(ValidationError::YearOutOfRange { year: 999, .. })
        ));

        book.publication_year = 2024;
        assert_eq!(book.validate(1000, 2024), Ok(()));

        book.genre = Genre::Unlisted("Poetry".to_string());
        assert_eq!(book.validate(1000, 2024), Err(ValidationError::UnknownGenre("Poetry".to_string())));
    }

    #[test]
    fn record_keeps_text_as_typed_and_timestamp_parses() {
        let mut book = submission();
        book.title = "  Dune ".to_string();
        book.author = "Frank  Herbert ".to_string();
        assert_eq!(book.validate(1000, 2024), Ok(()));

        let record = book.into_record(timestamp_now());
        assert_eq!(record.title, "  Dune ");
        assert_eq!(record.author, "Frank  Herbert ");
        assert!(record.added_at().is_some());
        assert_eq!(record.status_label(), "Read");
    }

    #[test]
    fn years_beyond_the_32_bit_range_are_accepted() {
        let mut book = submission();
        book.publication_year = 3_000_000_000;
        assert_eq!(book.validate(i64::MIN, i64::MAX), Ok(()));
        assert_eq!(book.into_record(timestamp_now()).publication_year, 3_000_000_000);
    }
}

//! Book data models.
//!
//! `Book` is the persisted record. Dates that have not happened yet hold the
//! distant-past sentinel instead of being nullable.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookError, BookResult};

/// Seconds from the Unix epoch to 0001-01-01T00:00:00Z.
const DISTANT_PAST_SECS: i64 = -62_135_596_800;

/// Sentinel stored in `date_started`/`date_completed` until the event happens.
pub fn distant_past() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(DISTANT_PAST_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn is_unset(date: &DateTime<Utc>) -> bool {
    *date <= distant_past()
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "camelCase")]
pub enum BookStatus {
    #[default]
    OnShelf,
    InProgress,
    Completed,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [
        BookStatus::OnShelf,
        BookStatus::InProgress,
        BookStatus::Completed,
    ];

    /// Integer persisted in the `status` column.
    pub fn ordinal(self) -> i64 {
        match self {
            BookStatus::OnShelf => 0,
            BookStatus::InProgress => 1,
            BookStatus::Completed => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookStatus::OnShelf => "On Shelf",
            BookStatus::InProgress => "In Progress",
            BookStatus::Completed => "Completed",
        }
    }

    pub fn tag(self) -> StatusTag {
        match self {
            BookStatus::OnShelf => StatusTag::Shelf,
            BookStatus::InProgress => StatusTag::Reading,
            BookStatus::Completed => StatusTag::Finished,
        }
    }

    pub fn has_started(self) -> bool {
        matches!(self, BookStatus::InProgress | BookStatus::Completed)
    }

    pub fn has_completed(self) -> bool {
        self == BookStatus::Completed
    }
}

impl TryFrom<i64> for BookStatus {
    type Error = BookError;

    fn try_from(value: i64) -> BookResult<Self> {
        match value {
            0 => Ok(BookStatus::OnShelf),
            1 => Ok(BookStatus::InProgress),
            2 => Ok(BookStatus::Completed),
            other => Err(BookError::MissingStatus(other)),
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Symbolic icon tag for a status. Rendering is left to the shell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StatusTag {
    Shelf,
    Reading,
    Finished,
}

impl StatusTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::Shelf => "shelf",
            StatusTag::Reading => "reading",
            StatusTag::Finished => "finished",
        }
    }
}

/// Star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = BookError;

    fn try_from(value: i64) -> BookResult<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(BookError::InvalidRating(value))
        }
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub date_added: DateTime<Utc>,
    pub date_started: DateTime<Utc>,
    pub date_completed: DateTime<Utc>,
    #[serde(alias = "summary", default)]
    pub synopsis: String,
    pub rating: Option<Rating>,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default)]
    pub recommended_by: String,
}

impl Book {
    /// A freshly added book: on the shelf, added now, not started.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self::added_at(title, author, Utc::now())
    }

    pub fn added_at(
        title: impl Into<String>,
        author: impl Into<String>,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            author: author.into(),
            date_added,
            date_started: distant_past(),
            date_completed: distant_past(),
            synopsis: String::new(),
            rating: None,
            status: BookStatus::OnShelf,
            recommended_by: String::new(),
        }
    }

    pub fn icon(&self) -> StatusTag {
        self.status.tag()
    }

    pub fn dates(&self) -> DatePair {
        DatePair {
            date_started: self.date_started,
            date_completed: self.date_completed,
        }
    }
}

/// Start/completion dates produced by a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePair {
    pub date_started: DateTime<Utc>,
    pub date_completed: DateTime<Utc>,
}

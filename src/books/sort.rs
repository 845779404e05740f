use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    db::models::Book,
    error::{BookError, BookResult},
};

/// User-selectable ordering for the book list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Status ordinal, then title.
    #[default]
    Status,
    Title,
    Author,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Status, SortOrder::Title, SortOrder::Author];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Status => "status",
            SortOrder::Title => "title",
            SortOrder::Author => "author",
        }
    }

    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortOrder::Status => a
                .status
                .ordinal()
                .cmp(&b.status.ordinal())
                .then_with(|| a.title.cmp(&b.title)),
            SortOrder::Title => a.title.cmp(&b.title),
            SortOrder::Author => a.author.cmp(&b.author),
        }
    }

    /// Stable sort, so ties keep their incoming order.
    pub fn sort(&self, books: &mut [Book]) {
        books.sort_by(|a, b| self.compare(a, b));
    }

    /// ORDER BY terms for the `books` table, matching [`SortOrder::compare`].
    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            SortOrder::Status => "status ASC, title ASC",
            SortOrder::Title => "title ASC",
            SortOrder::Author => "author ASC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = BookError;

    fn from_str(value: &str) -> BookResult<Self> {
        match value {
            "status" => Ok(SortOrder::Status),
            "title" => Ok(SortOrder::Title),
            "author" => Ok(SortOrder::Author),
            other => Err(BookError::UnknownSortOrder(other.to_string())),
        }
    }
}

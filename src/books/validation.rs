use chrono::{DateTime, Utc};

use crate::{
    db::models::{Book, Rating},
    error::{BookError, BookResult},
};

pub fn validate_rating(rating: Option<i64>) -> BookResult<Option<Rating>> {
    rating.map(Rating::try_from).transpose()
}

pub fn validate_title(title: &str) -> BookResult<()> {
    if title.trim().is_empty() {
        return Err(BookError::MissingTitle);
    }
    Ok(())
}

pub(crate) fn ensure_not_before(
    field: &'static str,
    value: DateTime<Utc>,
    bound_field: &'static str,
    bound: DateTime<Utc>,
) -> BookResult<()> {
    if value < bound {
        return Err(BookError::DateOutOfBounds {
            field,
            value: value.to_rfc3339(),
            bound_field,
            bound: bound.to_rfc3339(),
        });
    }
    Ok(())
}

/// Checks the ordering of whichever dates the book's status makes meaningful.
pub fn validate_date_bounds(book: &Book) -> BookResult<()> {
    if book.status.has_started() {
        ensure_not_before(
            "date_started",
            book.date_started,
            "date_added",
            book.date_added,
        )?;
    }
    if book.status.has_completed() {
        ensure_not_before(
            "date_completed",
            book.date_completed,
            "date_started",
            book.date_started,
        )?;
    }
    Ok(())
}

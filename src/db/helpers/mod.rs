use chrono::{DateTime, Datelike, Utc};

use crate::{
    db::models::{BookStatus, Rating},
    error::{BookError, BookResult},
};

/// RFC 3339 only covers four-digit years; anything else could not be read back.
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

pub fn format_datetime(value: &DateTime<Utc>, field: &'static str) -> BookResult<String> {
    if !STORABLE_YEARS.contains(&value.year()) {
        return Err(BookError::InvalidTimestamp {
            field,
            value: value.to_rfc3339(),
        });
    }
    Ok(value.to_rfc3339())
}

pub fn parse_datetime(value: &str, field: &'static str) -> BookResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| BookError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

pub fn parse_status(value: i64) -> BookResult<BookStatus> {
    BookStatus::try_from(value)
}

pub fn parse_optional_rating(value: Option<i64>) -> BookResult<Option<Rating>> {
    value.map(Rating::try_from).transpose()
}

//! Book store error types.

use thiserror::Error;

/// Errors that can occur while editing or persisting books.
#[derive(Debug, Error)]
pub enum BookError {
    /// The backing store could not be opened or migrated.
    #[error("failed to initialize book store: {0}")]
    StoreInitialization(String),

    /// Rating outside 1..=5.
    #[error("rating {0} is out of range (expected 1-5)")]
    InvalidRating(i64),

    /// Stored status ordinal that no status maps to.
    #[error("unknown book status ordinal {0}")]
    MissingStatus(i64),

    /// A date earlier than the date it is bounded by.
    #[error("{field} ({value}) is earlier than {bound_field} ({bound})")]
    DateOutOfBounds {
        field: &'static str,
        value: String,
        bound_field: &'static str,
        bound: String,
    },

    #[error("a book needs a title")]
    MissingTitle,

    /// Stored timestamp that is not RFC 3339.
    #[error("invalid {field} timestamp '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("book not found: {0}")]
    NotFound(String),

    #[error("book already exists: {0}")]
    AlreadyExists(String),

    #[error("unknown sort order '{0}'")]
    UnknownSortOrder(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The database worker thread stopped answering.
    #[error("database worker unavailable: {0}")]
    WorkerUnavailable(String),
}

/// Result type for book operations.
pub type BookResult<T> = Result<T, BookError>;

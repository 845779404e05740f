//! Edit buffer for a single book.
//!
//! Editing is two-phase: [`BookEditor::load`] copies a stored record into the
//! buffer without touching any dates, and only [`BookEditor::set_status`]
//! runs the status/date bookkeeping from [`super::transition`].

use chrono::{DateTime, Utc};

use crate::{
    books::{
        transition::next_dates,
        validation::{ensure_not_before, validate_date_bounds, validate_rating},
    },
    db::{
        models::{Book, BookStatus, DatePair, Rating},
        Database,
    },
    error::BookResult,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BookEditor {
    book_id: String,
    status: BookStatus,
    rating: Option<Rating>,
    date_added: DateTime<Utc>,
    date_started: DateTime<Utc>,
    date_completed: DateTime<Utc>,
    pub title: String,
    pub author: String,
    pub synopsis: String,
    pub recommended_by: String,
}

impl BookEditor {
    pub fn load(book: &Book) -> Self {
        Self {
            book_id: book.id.clone(),
            status: book.status,
            rating: book.rating,
            date_added: book.date_added,
            date_started: book.date_started,
            date_completed: book.date_completed,
            title: book.title.clone(),
            author: book.author.clone(),
            synopsis: book.synopsis.clone(),
            recommended_by: book.recommended_by.clone(),
        }
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn date_added(&self) -> DateTime<Utc> {
        self.date_added
    }

    pub fn dates(&self) -> DatePair {
        DatePair {
            date_started: self.date_started,
            date_completed: self.date_completed,
        }
    }

    /// Switch to `status`, updating the start/completion dates for the move.
    /// Selecting the current status again leaves everything as is.
    pub fn set_status(&mut self, status: BookStatus, now: DateTime<Utc>) -> DatePair {
        let pair = next_dates(
            self.status,
            status,
            self.date_added,
            self.date_started,
            self.date_completed,
            now,
        );
        self.status = status;
        self.date_started = pair.date_started;
        self.date_completed = pair.date_completed;
        pair
    }

    pub fn set_rating(&mut self, rating: Option<i64>) -> BookResult<()> {
        self.rating = validate_rating(rating)?;
        Ok(())
    }

    pub fn set_date_added(&mut self, date: DateTime<Utc>) {
        self.date_added = date;
    }

    /// Must not precede the date added.
    pub fn set_date_started(&mut self, date: DateTime<Utc>) -> BookResult<()> {
        ensure_not_before("date_started", date, "date_added", self.date_added)?;
        self.date_started = date;
        Ok(())
    }

    /// Must not precede the start date.
    pub fn set_date_completed(&mut self, date: DateTime<Utc>) -> BookResult<()> {
        ensure_not_before("date_completed", date, "date_started", self.date_started)?;
        self.date_completed = date;
        Ok(())
    }

    pub fn shows_date_started(&self) -> bool {
        self.status.has_started()
    }

    pub fn shows_date_completed(&self) -> bool {
        self.status.has_completed()
    }

    /// Whether saving would change `book`.
    pub fn is_changed(&self, book: &Book) -> bool {
        self.to_book() != *book
    }

    pub fn to_book(&self) -> Book {
        Book {
            id: self.book_id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            date_added: self.date_added,
            date_started: self.date_started,
            date_completed: self.date_completed,
            synopsis: self.synopsis.clone(),
            rating: self.rating,
            status: self.status,
            recommended_by: self.recommended_by.clone(),
        }
    }

    /// Write the buffer back over the stored record.
    pub async fn commit(&self, db: &Database) -> BookResult<Book> {
        let book = self.to_book();
        validate_date_bounds(&book)?;
        db.update_book(&book).await?;
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::{
        db::models::{distant_past, is_unset},
        error::BookError,
    };

    fn added() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 12, 9, 0, 0).unwrap()
    }

    fn in_progress_book() -> Book {
        let mut book = Book::added_at("Piranesi", "Susanna Clarke", added());
        book.status = BookStatus::InProgress;
        book.date_started = added() + Duration::days(2);
        book
    }

    #[test]
    fn loading_does_not_touch_dates() {
        let book = in_progress_book();

        let editor = BookEditor::load(&book);

        assert_eq!(editor.status(), BookStatus::InProgress);
        assert_eq!(editor.dates(), book.dates());
        assert_eq!(editor.date_added(), book.date_added);
        assert!(!editor.is_changed(&book));
        assert_eq!(editor.to_book(), book);
    }

    #[test]
    fn status_change_returns_new_dates() {
        let book = in_progress_book();
        let mut editor = BookEditor::load(&book);
        let now = added() + Duration::days(10);

        let pair = editor.set_status(BookStatus::Completed, now);

        assert_eq!(pair.date_started, book.date_started);
        assert_eq!(pair.date_completed, now);
        assert_eq!(editor.dates(), pair);
        assert!(editor.shows_date_completed());
        assert!(editor.is_changed(&book));
    }

    #[test]
    fn repeated_status_is_a_no_op() {
        let mut editor = BookEditor::load(&in_progress_book());
        let first = editor.set_status(BookStatus::Completed, added() + Duration::days(10));

        let second = editor.set_status(BookStatus::Completed, added() + Duration::days(20));

        assert_eq!(second, first);
    }

    #[test]
    fn shelving_clears_dates() {
        let mut editor = BookEditor::load(&in_progress_book());

        let pair = editor.set_status(BookStatus::OnShelf, added() + Duration::days(5));

        assert!(is_unset(&pair.date_started));
        assert!(is_unset(&pair.date_completed));
        assert!(!editor.shows_date_started());
    }

    #[test]
    fn completing_from_shelf_backfills_start() {
        let book = Book::added_at("Piranesi", "Susanna Clarke", added());
        let mut editor = BookEditor::load(&book);
        let now = added() + Duration::days(1);

        let pair = editor.set_status(BookStatus::Completed, now);

        assert_eq!(pair.date_started, added());
        assert_eq!(pair.date_completed, now);
    }

    #[test]
    fn rating_is_validated() {
        let mut editor = BookEditor::load(&in_progress_book());

        assert!(matches!(
            editor.set_rating(Some(6)),
            Err(BookError::InvalidRating(6))
        ));
        assert_eq!(editor.rating(), None);

        editor.set_rating(Some(4)).unwrap();
        assert_eq!(editor.rating().map(Rating::value), Some(4));

        editor.set_rating(None).unwrap();
        assert_eq!(editor.rating(), None);
    }

    #[test]
    fn date_setters_respect_lower_bounds() {
        let mut editor = BookEditor::load(&in_progress_book());

        assert!(matches!(
            editor.set_date_started(added() - Duration::days(1)),
            Err(BookError::DateOutOfBounds { .. })
        ));
        editor.set_date_started(added()).unwrap();

        assert!(matches!(
            editor.set_date_completed(added() - Duration::hours(1)),
            Err(BookError::DateOutOfBounds { .. })
        ));
        editor.set_date_completed(added() + Duration::days(3)).unwrap();
        assert_eq!(editor.dates().date_started, added());
    }

    #[test]
    fn shelf_sentinels_stay_below_any_bound() {
        let editor = BookEditor::load(&Book::added_at("Piranesi", "Susanna Clarke", added()));
        assert_eq!(editor.dates().date_started, distant_past());
    }

    #[tokio::test]
    async fn commit_writes_the_buffer() {
        let db = Database::open_in_memory().unwrap();
        let book = in_progress_book();
        db.insert_book(&book).await.unwrap();

        let mut editor = BookEditor::load(&book);
        editor.title = "Piranesi (2nd reading)".into();
        editor.recommended_by = "Alex".into();
        editor.set_status(BookStatus::Completed, added() + Duration::days(9));
        let saved = editor.commit(&db).await.unwrap();

        assert_eq!(db.get_book(&book.id).await.unwrap(), Some(saved.clone()));
        assert_eq!(saved.status, BookStatus::Completed);
        assert_eq!(saved.recommended_by, "Alex");
    }
}

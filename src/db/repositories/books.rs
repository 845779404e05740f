use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{
    books::sort::SortOrder,
    db::{
        connection::Database,
        helpers::{format_datetime, parse_datetime, parse_optional_rating, parse_status},
        models::Book,
    },
    error::{BookError, BookResult},
};

const BOOK_COLUMNS: &str = "id, title, author, date_added, date_started, date_completed, \
                            synopsis, rating, status, recommended_by";

fn row_to_book(row: &Row) -> BookResult<Book> {
    let date_added: String = row.get("date_added")?;
    let date_started: String = row.get("date_started")?;
    let date_completed: String = row.get("date_completed")?;

    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        date_added: parse_datetime(&date_added, "date_added")?,
        date_started: parse_datetime(&date_started, "date_started")?,
        date_completed: parse_datetime(&date_completed, "date_completed")?,
        synopsis: row.get("synopsis")?,
        rating: parse_optional_rating(row.get("rating")?)?,
        status: parse_status(row.get("status")?)?,
        recommended_by: row.get("recommended_by")?,
    })
}

fn book_exists(conn: &Connection, id: &str) -> BookResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM books WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

impl Database {
    pub async fn insert_book(&self, book: &Book) -> BookResult<()> {
        let record = book.clone();
        self.execute(move |conn| {
            if book_exists(conn, &record.id)? {
                return Err(BookError::AlreadyExists(record.id));
            }

            conn.execute(
                "INSERT INTO books (id, title, author, date_added, date_started, date_completed, synopsis, rating, status, recommended_by)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    record.id,
                    record.title,
                    record.author,
                    format_datetime(&record.date_added, "date_added")?,
                    format_datetime(&record.date_started, "date_started")?,
                    format_datetime(&record.date_completed, "date_completed")?,
                    record.synopsis,
                    record.rating.map(i64::from),
                    record.status.ordinal(),
                    record.recommended_by,
                ],
            )?;

            info!("Added book {} ({})", record.id, record.title);
            Ok(())
        })
        .await
    }

    /// Replace every stored field of an existing book.
    pub async fn update_book(&self, book: &Book) -> BookResult<()> {
        let record = book.clone();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE books
                 SET title = ?1,
                     author = ?2,
                     date_added = ?3,
                     date_started = ?4,
                     date_completed = ?5,
                     synopsis = ?6,
                     rating = ?7,
                     status = ?8,
                     recommended_by = ?9
                 WHERE id = ?10",
                params![
                    record.title,
                    record.author,
                    format_datetime(&record.date_added, "date_added")?,
                    format_datetime(&record.date_started, "date_started")?,
                    format_datetime(&record.date_completed, "date_completed")?,
                    record.synopsis,
                    record.rating.map(i64::from),
                    record.status.ordinal(),
                    record.recommended_by,
                    record.id,
                ],
            )?;

            if rows_affected == 0 {
                return Err(BookError::NotFound(record.id));
            }

            debug!("Updated book {}", record.id);
            Ok(())
        })
        .await
    }

    pub async fn delete_book(&self, book_id: &str) -> BookResult<()> {
        let book_id = book_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute("DELETE FROM books WHERE id = ?1", params![book_id])?;

            if rows_affected == 0 {
                return Err(BookError::NotFound(book_id));
            }

            info!("Deleted book {book_id}");
            Ok(())
        })
        .await
    }

    pub async fn get_book(&self, book_id: &str) -> BookResult<Option<Book>> {
        let book_id = book_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![book_id])?;
            let book = match rows.next()? {
                Some(row) => Some(row_to_book(row)?),
                None => None,
            };
            Ok(book)
        })
        .await
    }

    /// All books in the requested order; ties fall back to insertion order.
    pub async fn list_books(&self, sort: SortOrder) -> BookResult<Vec<Book>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOOK_COLUMNS} FROM books ORDER BY {}, rowid ASC",
                sort.order_by()
            ))?;

            let mut rows = stmt.query([])?;
            let mut books = Vec::new();
            while let Some(row) = rows.next()? {
                books.push(row_to_book(row)?);
            }

            Ok(books)
        })
        .await
    }
}

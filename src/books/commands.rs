use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    books::{
        sort::SortOrder,
        transition::next_dates,
        validation::{validate_date_bounds, validate_title},
    },
    db::models::{Book, BookStatus, DatePair},
    error::BookError,
    AppState,
};

/// Input for adding a book to the shelf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookInput {
    pub title: String,
    pub author: String,
}

/// A status picked in the edit form, with the dates the form currently shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeInput {
    pub previous: BookStatus,
    pub next: BookStatus,
    pub date_added: DateTime<Utc>,
    pub date_started: DateTime<Utc>,
    pub date_completed: DateTime<Utc>,
}

pub async fn add_book(state: &AppState, input: NewBookInput) -> Result<Book, String> {
    validate_title(&input.title).map_err(|e| e.to_string())?;

    let book = Book::new(input.title, input.author);
    state
        .db
        .insert_book(&book)
        .await
        .map_err(|e| e.to_string())?;
    Ok(book)
}

pub async fn get_book(state: &AppState, book_id: String) -> Result<Book, String> {
    let book = state
        .db
        .get_book(&book_id)
        .await
        .map_err(|e| e.to_string())?;
    book.ok_or_else(|| BookError::NotFound(book_id).to_string())
}

/// Lists books in `sort_order`, or in the saved preference when none is given.
pub async fn list_books(
    state: &AppState,
    sort_order: Option<SortOrder>,
) -> Result<Vec<Book>, String> {
    let sort_order = sort_order.unwrap_or_else(|| state.settings.sort_order());
    state
        .db
        .list_books(sort_order)
        .await
        .map_err(|e| e.to_string())
}

pub async fn update_book(state: &AppState, book: Book) -> Result<Book, String> {
    validate_date_bounds(&book).map_err(|e| e.to_string())?;
    state
        .db
        .update_book(&book)
        .await
        .map_err(|e| e.to_string())?;
    Ok(book)
}

pub async fn delete_book(state: &AppState, book_id: String) -> Result<(), String> {
    state
        .db
        .delete_book(&book_id)
        .await
        .map_err(|e| e.to_string())
}

/// Dates the edit form should show after the user picks a new status.
pub fn change_status(input: StatusChangeInput) -> DatePair {
    next_dates(
        input.previous,
        input.next,
        input.date_added,
        input.date_started,
        input.date_completed,
        Utc::now(),
    )
}

pub fn get_sort_order(state: &AppState) -> SortOrder {
    state.settings.sort_order()
}

pub fn set_sort_order(state: &AppState, sort_order: SortOrder) -> Result<(), String> {
    state
        .settings
        .update_sort_order(sort_order)
        .map_err(|e| e.to_string())
}

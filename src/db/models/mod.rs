pub mod book;

pub use book::{distant_past, is_unset, Book, BookStatus, DatePair, Rating, StatusTag};

//! Response envelopes: `{"book": ...}` for one record, `{"books": [...]}` for many.

use crate::model::Book;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct BookBody {
    pub book: Book,
}

#[derive(Serialize)]
pub struct BooksBody {
    pub books: Vec<Book>,
}

pub fn book_created(book: Book) -> (StatusCode, Json<BookBody>) {
    (StatusCode::CREATED, Json(BookBody { book }))
}

pub fn book_ok(book: Book) -> (StatusCode, Json<BookBody>) {
    (StatusCode::OK, Json(BookBody { book }))
}

pub fn books_ok(books: Vec<Book>) -> (StatusCode, Json<BooksBody>) {
    (StatusCode::OK, Json(BooksBody { books }))
}

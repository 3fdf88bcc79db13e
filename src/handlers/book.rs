//! Book CRUD handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::model::Book;
use crate::response::{book_created, book_ok, books_ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid book id '{}'", id_str)))
}

async fn load_book(state: &AppState, id: i64) -> Result<Book, AppError> {
    state
        .store
        .load_by_primary_key::<Book>(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {}", id)))
}

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let books = state.store.load_all::<Book>().await?;
    Ok(books_ok(books))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Json(mut book) = body?;
    state.store.insert(&mut book).await?;
    tracing::info!(id = book.id, "book created");
    Ok(book_created(book))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let book = load_book(&state, id).await?;
    Ok(book_ok(book))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Json(incoming) = body?;
    let id = parse_id(&id_str)?;
    let mut book = load_book(&state, id).await?;
    book.update_fields(incoming);
    state.store.update(&book).await?;
    Ok(book_ok(book))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.store.delete_by_primary_key::<Book>(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

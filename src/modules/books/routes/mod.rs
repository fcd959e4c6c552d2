//! HTTP handlers for `/books`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookstore_http::{ApiJson, AppError, MessageResponse};

use super::models::{Book, CreateBook, UpdateBook};
use super::repository::BookRepository;

/// Repository handle shared by every handler.
pub type SharedRepository = Arc<dyn BookRepository>;

/// Message carried by every 404 from this module.
pub const BOOK_NOT_FOUND: &str = "book not found";

/// Routes relative to the module's base path.
pub fn router(repository: SharedRepository) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(repository)
}

async fn list_books(State(repo): State<SharedRepository>) -> Result<Json<Vec<Book>>, AppError> {
    let books = repo.list().await?;
    tracing::debug!(count = books.len(), "listed books");
    Ok(Json(books))
}

async fn get_book(
    State(repo): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    repo.get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))
}

async fn create_book(
    State(repo): State<SharedRepository>,
    ApiJson(request): ApiJson<CreateBook>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = repo.create(request).await?;
    tracing::info!(book_id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(repo): State<SharedRepository>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateBook>,
) -> Result<Json<MessageResponse>, AppError> {
    if !repo.update(&id, request).await? {
        return Err(AppError::not_found(BOOK_NOT_FOUND));
    }
    tracing::info!(book_id = %id, "book updated");
    Ok(Json(MessageResponse::new("book updated")))
}

async fn delete_book(
    State(repo): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(BOOK_NOT_FOUND));
    }
    tracing::info!(book_id = %id, "book deleted");
    Ok(Json(MessageResponse::new("book deleted")))
}

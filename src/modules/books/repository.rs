//! Data access for books.

use async_trait::async_trait;
use bookstore_http::AppError;
use sqlx::PgPool;

use super::models::{Book, CreateBook, UpdateBook};

#[derive(Debug, thiserror::Error)]
pub enum BookRepositoryError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<BookRepositoryError> for AppError {
    fn from(err: BookRepositoryError) -> Self {
        AppError::Internal(err.into())
    }
}

/// Storage port used by the book handlers.
///
/// `update` and `delete` report whether a row matched; a missing id is not an
/// error at this layer.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>, BookRepositoryError>;

    async fn get(&self, id: &str) -> Result<Option<Book>, BookRepositoryError>;

    async fn create(&self, request: CreateBook) -> Result<Book, BookRepositoryError>;

    async fn update(&self, id: &str, request: UpdateBook) -> Result<bool, BookRepositoryError>;

    async fn delete(&self, id: &str) -> Result<bool, BookRepositoryError>;
}

const LIST_BOOKS: &str =
    "SELECT id, title, author, publisher, language, price, is_available, description FROM books";

const GET_BOOK: &str = "SELECT id, title, author, publisher, language, price, is_available, description \
     FROM books WHERE id = $1";

/// PostgreSQL-backed repository. One statement per call.
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let books = sqlx::query_as::<_, Book>(LIST_BOOKS)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get(&self, id: &str) -> Result<Option<Book>, BookRepositoryError> {
        let book = sqlx::query_as::<_, Book>(GET_BOOK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, request: CreateBook) -> Result<Book, BookRepositoryError> {
        let id: String = sqlx::query_scalar(
            "INSERT INTO books (title, author, publisher, language, price, is_available, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(&request.title)
        .bind(&request.author)
        .bind(&request.publisher)
        .bind(&request.language)
        .bind(request.price)
        .bind(request.is_available)
        .bind(&request.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(Book::from_create(id, request))
    }

    async fn update(&self, id: &str, request: UpdateBook) -> Result<bool, BookRepositoryError> {
        let result = sqlx::query(
            "UPDATE books SET title = $1, author = $2, publisher = $3, language = $4, \
             price = $5, is_available = $6, description = $7 WHERE id = $8",
        )
        .bind(&request.title)
        .bind(&request.author)
        .bind(&request.publisher)
        .bind(&request.language)
        .bind(request.price)
        .bind(request.is_available)
        .bind(&request.description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, BookRepositoryError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

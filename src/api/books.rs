//! Book catalog endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{BookSummary, NewBook},
};

/// Notice returned when a book listing comes back empty
pub const NO_BOOKS_NOTICE: &str = "No books are available at the moment.";

/// Add book response
#[derive(Serialize, ToSchema)]
pub struct AddBookResponse {
    /// Book ID assigned by storage
    pub id: i64,
    /// Confirmation message
    pub message: String,
}

/// Book listing response
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    /// Books in the listing
    pub books: Vec<BookSummary>,
    /// Notice set when the listing is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BookListResponse {
    pub fn new(books: Vec<BookSummary>, empty_notice: &str) -> Self {
        let message = books.is_empty().then(|| empty_notice.to_string());
        Self { books, message }
    }
}

/// Add a new book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Book added", body = AddBookResponse),
        (status = 400, description = "Missing title or author")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(request): Json<NewBook>,
) -> AppResult<(StatusCode, Json<AddBookResponse>)> {
    let book = state.services.catalog.add_book(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddBookResponse {
            id: book.id,
            message: format!("Book '{}' has been added to the library.", book.title),
        }),
    ))
}

/// List every book in the catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BookListResponse>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(BookListResponse::new(books, NO_BOOKS_NOTICE)))
}

/// List books currently available to borrow
#[utoipa::path(
    get,
    path = "/books/available",
    tag = "books",
    responses(
        (status = 200, description = "Available books", body = BookListResponse)
    )
)]
pub async fn list_available_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BookListResponse>> {
    let books = state.services.catalog.list_available_books().await?;
    Ok(Json(BookListResponse::new(books, NO_BOOKS_NOTICE)))
}

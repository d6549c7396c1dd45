//! Borrow and return endpoints

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::borrow::BorrowSummary};

/// Notice returned when no books are currently borrowed
pub const NO_BORROWS_NOTICE: &str = "No books are currently borrowed.";

/// Borrow request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Exact title of the book to borrow
    pub title: String,
    /// Name of the borrower
    pub borrower: String,
}

/// Borrow response
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    /// Borrow record ID
    pub id: i64,
    /// Date the book was borrowed
    pub borrow_date: NaiveDate,
    /// Confirmation message
    pub message: String,
}

/// Return request
#[derive(Deserialize, ToSchema)]
pub struct ReturnRequest {
    /// Exact title of the book to return
    pub title: String,
}

/// Return response
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Confirmation message
    pub message: String,
}

/// Borrowed books listing response
#[derive(Serialize, ToSchema)]
pub struct BorrowedListResponse {
    /// Borrowed books with borrower and date
    pub books: Vec<BorrowSummary>,
    /// Notice set when the listing is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BorrowedListResponse {
    pub fn new(books: Vec<BorrowSummary>, empty_notice: &str) -> Self {
        let message = books.is_empty().then(|| empty_notice.to_string());
        Self { books, message }
    }
}

/// Borrow a book by title
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Book borrowed", body = BorrowResponse),
        (status = 404, description = "No book with that title"),
        (status = 409, description = "Book is already borrowed")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let record = state
        .services
        .catalog
        .borrow_book(&request.title, &request.borrower)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            id: record.id,
            borrow_date: record.borrow_date,
            message: format!(
                "Book '{}' has been borrowed by {}.",
                request.title, request.borrower
            ),
        }),
    ))
}

/// Return a borrowed book by title
#[utoipa::path(
    post,
    path = "/borrows/return",
    tag = "borrows",
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "No book with that title"),
        (status = 409, description = "Book is not currently borrowed")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<ReturnResponse>> {
    let book = state.services.catalog.return_book(&request.title).await?;

    Ok(Json(ReturnResponse {
        message: format!("The book '{}' has been returned.", book.title),
    }))
}

/// List borrowed books with borrower information
#[utoipa::path(
    get,
    path = "/books/borrowed",
    tag = "borrows",
    responses(
        (status = 200, description = "Borrowed books", body = BorrowedListResponse)
    )
)]
pub async fn list_borrowed_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BorrowedListResponse>> {
    let books = state.services.catalog.list_borrowed_books().await?;
    Ok(Json(BorrowedListResponse::new(books, NO_BORROWS_NOTICE)))
}

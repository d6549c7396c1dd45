//! Catalog service implementing the book and borrow business rules
//!
//! A book is either available or borrowed. Borrowing creates an open borrow
//! record and flips the book's flag; returning closes the record and clears
//! the flag. Each operation is one atomic unit against storage.

use chrono::Local;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookSummary, NewBook},
        borrow::{BorrowRecord, BorrowSummary},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a new book to the catalog
    pub async fn add_book(&self, book: NewBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let created = self.repository.books.create(&book).await?;

        tracing::info!(book_id = created.id, title = %created.title, "book added");

        Ok(created)
    }

    /// Borrow a book by title, recording the borrower and today's date.
    ///
    /// Title lookup is a case-sensitive exact match. Duplicate titles resolve
    /// to the lowest-id row, see [`crate::repository::books::BooksRepository::find_by_title`].
    pub async fn borrow_book(&self, title: &str, borrower: &str) -> AppResult<BorrowRecord> {
        let book = self.find_by_title(title).await?;

        let today = Local::now().date_naive();
        let record = self.repository.borrows.open(&book, borrower, today).await?;

        tracing::info!(book_id = book.id, borrower = %borrower, "book borrowed");

        Ok(record)
    }

    /// Return a borrowed book by title
    pub async fn return_book(&self, title: &str) -> AppResult<Book> {
        let book = self.find_by_title(title).await?;

        let today = Local::now().date_naive();
        self.repository.borrows.close(&book, today).await?;

        tracing::info!(book_id = book.id, "book returned");

        Ok(Book {
            is_borrowed: false,
            ..book
        })
    }

    /// List books currently available to borrow
    pub async fn list_available_books(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list_available().await
    }

    /// List borrowed books with borrower name and borrow date
    pub async fn list_borrowed_books(&self) -> AppResult<Vec<BorrowSummary>> {
        self.repository.borrows.list_borrowed().await
    }

    /// List every book in the catalog regardless of status
    pub async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list_all().await
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Book> {
        self.repository
            .books
            .find_by_title(title)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Book '{}' does not exist in the library", title))
            })
    }
}

//! Borrow records repository for database operations
//!
//! Borrow and return each touch two rows (the borrow record and the book's
//! borrowed flag); both writes run inside one transaction so the
//! flag-matches-open-record invariant holds on every exit path.

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{book::Book, borrow::{BorrowRecord, BorrowSummary}},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Sqlite>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open a borrow record for a book and mark it borrowed.
    ///
    /// Availability is re-checked inside the transaction, so two borrowers
    /// racing on the same title serialize on the storage engine and only one
    /// wins. Any error before commit rolls the transaction back.
    pub async fn open(
        &self,
        book: &Book,
        borrower: &str,
        borrow_date: NaiveDate,
    ) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let is_borrowed: bool = sqlx::query_scalar("SELECT is_borrowed FROM books WHERE id = ?")
            .bind(book.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book.id)))?;

        if is_borrowed {
            return Err(AppError::AlreadyBorrowed(format!(
                "Book '{}' is already borrowed",
                book.title
            )));
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO borrows (book_id, borrower, borrow_date)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(book.id)
        .bind(borrower)
        .bind(borrow_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET is_borrowed = 1 WHERE id = ?")
            .bind(book.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(BorrowRecord {
            id,
            book_id: book.id,
            borrower: borrower.to_string(),
            borrow_date,
            return_date: None,
        })
    }

    /// Close the open borrow record for a book and mark it available.
    ///
    /// The borrowed flag is re-checked inside the transaction; returning a
    /// book that is not out fails without touching either table.
    pub async fn close(&self, book: &Book, return_date: NaiveDate) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let is_borrowed: bool = sqlx::query_scalar("SELECT is_borrowed FROM books WHERE id = ?")
            .bind(book.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book.id)))?;

        if !is_borrowed {
            return Err(AppError::NotBorrowed(format!(
                "Book '{}' is not currently borrowed",
                book.title
            )));
        }

        sqlx::query(
            "UPDATE borrows SET return_date = ? WHERE book_id = ? AND return_date IS NULL",
        )
        .bind(return_date)
        .bind(book.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET is_borrowed = 0 WHERE id = ?")
            .bind(book.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// List borrowed books joined to their open borrow record
    pub async fn list_borrowed(&self) -> AppResult<Vec<BorrowSummary>> {
        let books = sqlx::query_as::<_, BorrowSummary>(
            r#"
            SELECT books.title, books.author, borrows.borrower, borrows.borrow_date
            FROM books
            JOIN borrows ON books.id = borrows.book_id
            WHERE books.is_borrowed = 1 AND borrows.return_date IS NULL
            ORDER BY books.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }
}

//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::AppResult,
    models::book::{Book, BookSummary, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Insert a new book, available by default
    pub async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO books (title, author, year, is_borrowed)
            VALUES (?, ?, ?, 0)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await?;

        Ok(Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            is_borrowed: false,
        })
    }

    /// Find a book by exact title match.
    ///
    /// Titles carry no uniqueness constraint; duplicates resolve to the
    /// lowest-id row.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, year, is_borrowed
            FROM books
            WHERE title = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// List books that are not currently borrowed
    pub async fn list_available(&self) -> AppResult<Vec<BookSummary>> {
        let books = sqlx::query_as::<_, BookSummary>(
            "SELECT title, author, year FROM books WHERE is_borrowed = 0 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// List every book regardless of borrow status
    pub async fn list_all(&self) -> AppResult<Vec<BookSummary>> {
        let books = sqlx::query_as::<_, BookSummary>(
            "SELECT title, author, year FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }
}

//! Catalog service tests against an in-memory SQLite database

use chrono::Local;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use libris_server::{
    api::books::BookListResponse,
    api::borrows::BorrowedListResponse,
    error::AppError,
    models::book::NewBook,
    repository::Repository,
    services::catalog::CatalogService,
};

/// Set up a catalog service over a fresh in-memory database.
///
/// A single connection keeps every query on the same in-memory database.
async fn setup() -> (CatalogService, Pool<Sqlite>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    (CatalogService::new(Repository::new(pool.clone())), pool)
}

fn new_book(title: &str, author: &str, year: i32) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: author.to_string(),
        year,
    }
}

/// Number of books whose borrowed flag disagrees with the existence of an
/// open borrow record.
async fn flag_violations(pool: &Pool<Sqlite>) -> i64 {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM books b
        WHERE b.is_borrowed != EXISTS(
            SELECT 1 FROM borrows WHERE book_id = b.id AND return_date IS NULL
        )
        "#,
    )
    .fetch_one(pool)
    .await
    .expect("Failed to check invariant")
}

async fn borrow_count(pool: &Pool<Sqlite>) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM borrows")
        .fetch_one(pool)
        .await
        .expect("Failed to count borrows")
}

#[tokio::test]
async fn add_book_with_empty_title_is_rejected() {
    let (catalog, pool) = setup().await;

    let err = catalog
        .add_book(new_book("", "Herbert", 1965))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = catalog
        .add_book(new_book("Dune", "", 1965))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Nothing was inserted
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn add_then_list_includes_book() {
    let (catalog, _pool) = setup().await;

    let book = catalog
        .add_book(new_book("Dune", "Herbert", 1965))
        .await
        .unwrap();
    assert!(!book.is_borrowed);

    let all = catalog.list_books().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Dune");
    assert_eq!(all[0].author, "Herbert");
    assert_eq!(all[0].year, 1965);
    assert_eq!(all[0].to_string(), "Dune by Herbert (1965)");
}

#[tokio::test]
async fn borrow_and_return_round_trip() {
    let (catalog, pool) = setup().await;
    let today = Local::now().date_naive();

    catalog
        .add_book(new_book("Dune", "Herbert", 1965))
        .await
        .unwrap();

    // Borrow: shows up in the borrowed listing with borrower and today's date
    let record = catalog.borrow_book("Dune", "Alice").await.unwrap();
    assert_eq!(record.borrower, "Alice");
    assert_eq!(record.borrow_date, today);
    assert!(record.return_date.is_none());
    assert_eq!(flag_violations(&pool).await, 0);

    let borrowed = catalog.list_borrowed_books().await.unwrap();
    assert_eq!(borrowed.len(), 1);
    assert_eq!(borrowed[0].borrower, "Alice");
    assert_eq!(borrowed[0].borrow_date, today);
    assert_eq!(
        borrowed[0].to_string(),
        format!("Dune by Herbert, borrowed by Alice on {}", today)
    );

    let available = catalog.list_available_books().await.unwrap();
    assert!(available.is_empty());

    // Return: back in the available listing, gone from borrowed
    let returned = catalog.return_book("Dune").await.unwrap();
    assert!(!returned.is_borrowed);
    assert_eq!(flag_violations(&pool).await, 0);

    let borrowed = catalog.list_borrowed_books().await.unwrap();
    assert!(borrowed.is_empty());

    let available = catalog.list_available_books().await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].title, "Dune");

    // The closed record keeps its return date
    let open: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE return_date IS NULL")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(open, 0);
    assert_eq!(borrow_count(&pool).await, 1);
}

#[tokio::test]
async fn borrowing_a_borrowed_book_fails() {
    let (catalog, pool) = setup().await;

    catalog
        .add_book(new_book("Dune", "Herbert", 1965))
        .await
        .unwrap();
    catalog.borrow_book("Dune", "Alice").await.unwrap();

    let err = catalog.borrow_book("Dune", "Bob").await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyBorrowed(_)));

    // No second record was created
    assert_eq!(borrow_count(&pool).await, 1);
    assert_eq!(flag_violations(&pool).await, 0);
}

#[tokio::test]
async fn returning_an_unborrowed_book_fails() {
    let (catalog, pool) = setup().await;

    catalog
        .add_book(new_book("Dune", "Herbert", 1965))
        .await
        .unwrap();

    let err = catalog.return_book("Dune").await.unwrap_err();
    assert!(matches!(err, AppError::NotBorrowed(_)));

    assert_eq!(borrow_count(&pool).await, 0);
    assert_eq!(flag_violations(&pool).await, 0);
}

#[tokio::test]
async fn unknown_title_is_not_found() {
    let (catalog, _pool) = setup().await;

    let err = catalog.borrow_book("Dune", "Alice").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = catalog.return_book("Dune").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn title_lookup_is_case_sensitive() {
    let (catalog, _pool) = setup().await;

    catalog
        .add_book(new_book("Dune", "Herbert", 1965))
        .await
        .unwrap();

    let err = catalog.borrow_book("dune", "Alice").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn empty_catalog_listings_are_empty_not_errors() {
    let (catalog, _pool) = setup().await;

    assert!(catalog.list_books().await.unwrap().is_empty());
    assert!(catalog.list_available_books().await.unwrap().is_empty());
    assert!(catalog.list_borrowed_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_listings_carry_the_notice() {
    let (catalog, _pool) = setup().await;

    let books = catalog.list_books().await.unwrap();
    let response = BookListResponse::new(books, libris_server::api::books::NO_BOOKS_NOTICE);
    assert_eq!(
        response.message.as_deref(),
        Some("No books are available at the moment.")
    );

    let borrowed = catalog.list_borrowed_books().await.unwrap();
    let response =
        BorrowedListResponse::new(borrowed, libris_server::api::borrows::NO_BORROWS_NOTICE);
    assert_eq!(
        response.message.as_deref(),
        Some("No books are currently borrowed.")
    );

    // A non-empty listing has no notice
    catalog
        .add_book(new_book("Dune", "Herbert", 1965))
        .await
        .unwrap();
    let books = catalog.list_books().await.unwrap();
    let response = BookListResponse::new(books, libris_server::api::books::NO_BOOKS_NOTICE);
    assert!(response.message.is_none());
}

#[tokio::test]
async fn duplicate_titles_resolve_to_the_oldest_row() {
    let (catalog, pool) = setup().await;

    let first = catalog
        .add_book(new_book("Dune", "Herbert", 1965))
        .await
        .unwrap();
    catalog
        .add_book(new_book("Dune", "Herbert", 2010))
        .await
        .unwrap();

    catalog.borrow_book("Dune", "Alice").await.unwrap();

    let borrowed_id: i64 = sqlx::query_scalar(
        "SELECT book_id FROM borrows WHERE return_date IS NULL",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(borrowed_id, first.id);
    assert_eq!(flag_violations(&pool).await, 0);
}

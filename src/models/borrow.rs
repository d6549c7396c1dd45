//! Borrow record model and related types

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrow record from database. `return_date` stays absent while the
/// book is out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: i64,
    pub book_id: i64,
    pub borrower: String,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Borrowed book listing entry: a book joined to its open borrow record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowSummary {
    pub title: String,
    pub author: String,
    pub borrower: String,
    pub borrow_date: NaiveDate,
}

impl fmt::Display for BorrowSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {}, borrowed by {} on {}",
            self.title, self.author, self.borrower, self.borrow_date
        )
    }
}

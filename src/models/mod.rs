//! Data models for Libris

pub mod book;
pub mod borrow;

// Re-export commonly used types
pub use book::{Book, BookSummary, NewBook};
pub use borrow::{BorrowRecord, BorrowSummary};

use thiserror::Error;

use super::{BookId, BorrowingRecordId};

/// Rejected catalog input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace only
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    #[error("publication year {0} is out of range (1..=9999)")]
    PublicationYearOutOfRange(i32),
}

/// Refused lending state transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// borrow on a book that is already out
    #[error("book {0} is already borrowed")]
    AlreadyBorrowed(BookId),

    /// return on a book that is on the shelf
    #[error("book {0} is already in stock")]
    AlreadyInStock(BookId),

    /// The record was closed by an earlier return
    #[error("borrowing record {0} is already closed")]
    RecordAlreadyClosed(BorrowingRecordId),

    #[error("borrowing record {record_id} does not belong to book {book_id}")]
    RecordOfAnotherBook {
        record_id: BorrowingRecordId,
        book_id: BookId,
    },
}

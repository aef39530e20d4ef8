use crate::domain::{BookId, LendingError, PatronId, ValidationError};
use thiserror::Error;

/// Outcome classes the transport layer translates into status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Unexpected,
}

/// Application layer errors
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Book not found with id: {0}")]
    BookNotFound(BookId),

    #[error("Patron not found with id: {0}")]
    PatronNotFound(PatronId),

    /// No open loan of this book to this patron
    #[error("No active borrowing record found for book {book_id} and patron {patron_id}")]
    NoActiveBorrowingRecord {
        book_id: BookId,
        patron_id: PatronId,
    },

    #[error("Book with id: {0} is already borrowed at the moment")]
    BookAlreadyBorrowed(BookId),

    #[error("Book with id: {0} is already in stock at the moment")]
    BookAlreadyInStock(BookId),

    /// Referential guard refused the deletion
    #[error("Book with id: {0} can't be deleted because it has borrowing records")]
    BookHasBorrowingRecords(BookId),

    #[error("Patron with id: {0} can't be deleted because it has borrowing records")]
    PatronHasBorrowingRecords(PatronId),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Book repository error")]
    BookRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Patron repository error")]
    PatronRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Borrowing record repository error")]
    BorrowingRecordRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::BookNotFound(_)
            | ApplicationError::PatronNotFound(_)
            | ApplicationError::NoActiveBorrowingRecord { .. } => ErrorKind::NotFound,

            ApplicationError::BookAlreadyBorrowed(_)
            | ApplicationError::BookAlreadyInStock(_)
            | ApplicationError::BookHasBorrowingRecords(_)
            | ApplicationError::PatronHasBorrowingRecords(_) => ErrorKind::Conflict,

            ApplicationError::Validation(_) => ErrorKind::Validation,

            ApplicationError::BookRepositoryError(_)
            | ApplicationError::PatronRepositoryError(_)
            | ApplicationError::BorrowingRecordRepositoryError(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<LendingError> for ApplicationError {
    fn from(err: LendingError) -> Self {
        match err {
            LendingError::AlreadyBorrowed(book_id) => {
                ApplicationError::BookAlreadyBorrowed(book_id)
            }
            LendingError::AlreadyInStock(book_id) => ApplicationError::BookAlreadyInStock(book_id),
            // the lookup only returns open records of the requested book, so
            // reaching these means the record changed underneath us
            LendingError::RecordAlreadyClosed(_) | LendingError::RecordOfAnotherBook { .. } => {
                ApplicationError::BorrowingRecordRepositoryError(err.to_string().into())
            }
        }
    }
}

/// Application layer Result type
pub type Result<T> = std::result::Result<T, ApplicationError>;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Book, BorrowingRecord, NewBook, NewPatron, Patron, ValidationError};

// ============================================================================
// Requests
// ============================================================================

/// Book body for POST /api/books and PUT /api/books/:id
///
/// `id` and `borrowed` are accepted for compatibility and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub isbn: String,
}

impl BookRequest {
    pub fn to_new_book(&self) -> Result<NewBook, ValidationError> {
        NewBook::new(&self.title, &self.author, self.publication_year, &self.isbn)
    }
}

/// Patron body for POST /api/patrons and PUT /api/patrons/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatronRequest {
    pub name: String,
    pub contact_information: String,
}

impl PatronRequest {
    pub fn to_new_patron(&self) -> Result<NewPatron, ValidationError> {
        NewPatron::new(&self.name, &self.contact_information)
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub isbn: String,
    pub borrowed: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
            isbn: book.isbn,
            borrowed: book.borrowed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatronResponse {
    pub id: i64,
    pub name: String,
    pub contact_information: String,
}

impl From<Patron> for PatronResponse {
    fn from(patron: Patron) -> Self {
        Self {
            id: patron.id.value(),
            name: patron.name,
            contact_information: patron.contact_information,
        }
    }
}

/// Borrowing record. `returnDate` is null while the loan is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingRecordResponse {
    pub id: i64,
    pub book_id: i64,
    pub patron_id: i64,
    pub borrowing_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl From<BorrowingRecord> for BorrowingRecordResponse {
    fn from(record: BorrowingRecord) -> Self {
        Self {
            id: record.id.value(),
            book_id: record.book_id.value(),
            patron_id: record.patron_id.value(),
            borrowing_date: record.borrowing_date,
            return_date: record.return_date,
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

use chrono::NaiveDate;

use super::{BookId, PatronId};

/// Command: lend a book to a patron
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowBook {
    pub book_id: BookId,
    pub patron_id: PatronId,
    pub borrowed_on: NaiveDate,
}

/// Command: take a book back from a patron
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnBook {
    pub book_id: BookId,
    pub patron_id: PatronId,
    pub returned_on: NaiveDate,
}

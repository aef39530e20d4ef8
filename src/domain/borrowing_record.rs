use chrono::NaiveDate;

use super::{BookId, BorrowingRecordId, PatronId};

/// One loan of one book to one patron.
///
/// The record is open while `return_date` is `None` and closed once the
/// return is recorded. Records are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowingRecord {
    pub id: BorrowingRecordId,
    pub book_id: BookId,
    pub patron_id: PatronId,
    pub borrowing_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl BorrowingRecord {
    pub fn open(id: BorrowingRecordId, new_record: NewBorrowingRecord) -> Self {
        Self {
            id,
            book_id: new_record.book_id,
            patron_id: new_record.patron_id,
            borrowing_date: new_record.borrowing_date,
            return_date: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// A loan that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBorrowingRecord {
    pub book_id: BookId,
    pub patron_id: PatronId,
    pub borrowing_date: NaiveDate,
}

use chrono::NaiveDate;

use super::{Book, BorrowingRecord, LendingError, NewBorrowingRecord, Patron};

// ============================================================================
// Per-book lending state
// ============================================================================

/// Lending state of a book. It is global to the book, not per patron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// On the shelf
    Available,
    /// Out, with exactly one open borrowing record
    Borrowed,
}

impl Book {
    pub fn availability(&self) -> Availability {
        if self.borrowed {
            Availability::Borrowed
        } else {
            Availability::Available
        }
    }
}

// ============================================================================
// Transitions (pure functions)
// ============================================================================

/// Pure function: lend `book` to `patron`.
///
/// Available -> Borrowed. Returns the book with its flag set and the open
/// record to store. Both must be persisted together.
pub fn borrow_book(
    book: &Book,
    patron: &Patron,
    borrowed_on: NaiveDate,
) -> Result<(Book, NewBorrowingRecord), LendingError> {
    if book.availability() == Availability::Borrowed {
        return Err(LendingError::AlreadyBorrowed(book.id));
    }

    let borrowed_book = Book {
        borrowed: true,
        ..book.clone()
    };

    let record = NewBorrowingRecord {
        book_id: book.id,
        patron_id: patron.id,
        borrowing_date: borrowed_on,
    };

    Ok((borrowed_book, record))
}

/// Checks that `book` can be returned at all, before any record lookup.
pub fn ensure_returnable(book: &Book) -> Result<(), LendingError> {
    match book.availability() {
        Availability::Borrowed => Ok(()),
        Availability::Available => Err(LendingError::AlreadyInStock(book.id)),
    }
}

/// Pure function: take `book` back and close `record`.
///
/// Borrowed -> Available. The record must be open and belong to the book.
pub fn return_book(
    book: &Book,
    record: &BorrowingRecord,
    returned_on: NaiveDate,
) -> Result<(Book, BorrowingRecord), LendingError> {
    ensure_returnable(book)?;

    if record.book_id != book.id {
        return Err(LendingError::RecordOfAnotherBook {
            record_id: record.id,
            book_id: book.id,
        });
    }

    if !record.is_open() {
        return Err(LendingError::RecordAlreadyClosed(record.id));
    }

    let returned_book = Book {
        borrowed: false,
        ..book.clone()
    };

    let closed_record = BorrowingRecord {
        return_date: Some(returned_on),
        ..record.clone()
    };

    Ok((returned_book, closed_record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookId, BorrowingRecordId, NewBook, NewPatron, PatronId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn available_book() -> Book {
        Book::register(
            BookId::new(1),
            NewBook::new("Sample Title", "Sample Author", 2021, "1234567890").unwrap(),
        )
    }

    fn patron() -> Patron {
        Patron::register(
            PatronId::new(1),
            NewPatron::new("Sample Patron", "patron@example.org").unwrap(),
        )
    }

    #[test]
    fn test_borrow_available_book() {
        let book = available_book();

        let (borrowed, record) = borrow_book(&book, &patron(), date(2024, 3, 1)).unwrap();

        assert!(borrowed.borrowed);
        assert_eq!(borrowed.availability(), Availability::Borrowed);
        assert_eq!(record.book_id, book.id);
        assert_eq!(record.patron_id, PatronId::new(1));
        assert_eq!(record.borrowing_date, date(2024, 3, 1));
        // input untouched
        assert!(!book.borrowed);
    }

    #[test]
    fn test_borrow_borrowed_book_fails() {
        let book = Book {
            borrowed: true,
            ..available_book()
        };

        let result = borrow_book(&book, &patron(), date(2024, 3, 1));

        assert_eq!(
            result.unwrap_err(),
            LendingError::AlreadyBorrowed(BookId::new(1))
        );
    }

    #[test]
    fn test_return_closes_record_and_frees_book() {
        let book = available_book();
        let (borrowed, new_record) = borrow_book(&book, &patron(), date(2024, 3, 1)).unwrap();
        let record = BorrowingRecord::open(BorrowingRecordId::new(5), new_record);

        let (returned, closed) = return_book(&borrowed, &record, date(2024, 3, 15)).unwrap();

        assert!(!returned.borrowed);
        assert_eq!(closed.id, BorrowingRecordId::new(5));
        assert_eq!(closed.return_date, Some(date(2024, 3, 15)));
        assert!(!closed.is_open());
    }

    #[test]
    fn test_return_available_book_fails() {
        let book = available_book();
        assert_eq!(
            ensure_returnable(&book).unwrap_err(),
            LendingError::AlreadyInStock(BookId::new(1))
        );

        let record = BorrowingRecord::open(
            BorrowingRecordId::new(1),
            NewBorrowingRecord {
                book_id: book.id,
                patron_id: PatronId::new(1),
                borrowing_date: date(2024, 1, 1),
            },
        );
        assert_eq!(
            return_book(&book, &record, date(2024, 1, 2)).unwrap_err(),
            LendingError::AlreadyInStock(BookId::new(1))
        );
    }

    #[test]
    fn test_return_with_closed_record_fails() {
        let book = Book {
            borrowed: true,
            ..available_book()
        };
        let record = BorrowingRecord {
            id: BorrowingRecordId::new(2),
            book_id: book.id,
            patron_id: PatronId::new(1),
            borrowing_date: date(2024, 1, 1),
            return_date: Some(date(2024, 1, 10)),
        };

        assert_eq!(
            return_book(&book, &record, date(2024, 2, 1)).unwrap_err(),
            LendingError::RecordAlreadyClosed(BorrowingRecordId::new(2))
        );
    }

    #[test]
    fn test_return_with_record_of_another_book_fails() {
        let book = Book {
            borrowed: true,
            ..available_book()
        };
        let record = BorrowingRecord {
            id: BorrowingRecordId::new(3),
            book_id: BookId::new(99),
            patron_id: PatronId::new(1),
            borrowing_date: date(2024, 1, 1),
            return_date: None,
        };

        assert_eq!(
            return_book(&book, &record, date(2024, 2, 1)).unwrap_err(),
            LendingError::RecordOfAnotherBook {
                record_id: BorrowingRecordId::new(3),
                book_id: BookId::new(1),
            }
        );
    }

    #[test]
    fn test_borrow_return_cycle_repeats() {
        let mut book = available_book();

        for round in 1..=3 {
            let (borrowed, new_record) =
                borrow_book(&book, &patron(), date(2024, 1, round)).unwrap();
            let record = BorrowingRecord::open(BorrowingRecordId::new(round as i64), new_record);
            let (returned, _) = return_book(&borrowed, &record, date(2024, 1, round + 1)).unwrap();
            book = returned;
        }

        assert_eq!(book.availability(), Availability::Available);
    }
}

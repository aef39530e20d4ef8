use crate::application::{ApplicationError, Result, ServiceDependencies};
use crate::domain::{self, Book, BookId, BorrowingRecord, Patron, PatronId, commands::*};

/// Loads the book and the patron, in that order, failing on the first missing one.
async fn load_parties(
    deps: &ServiceDependencies,
    book_id: BookId,
    patron_id: PatronId,
) -> Result<(Book, Patron)> {
    let book = deps
        .books
        .find_by_id(book_id)
        .await
        .map_err(ApplicationError::BookRepositoryError)?
        .ok_or(ApplicationError::BookNotFound(book_id))?;

    let patron = deps
        .patrons
        .find_by_id(patron_id)
        .await
        .map_err(ApplicationError::PatronRepositoryError)?
        .ok_or(ApplicationError::PatronNotFound(patron_id))?;

    Ok((book, patron))
}

/// Lends a book to a patron.
///
/// Business rules:
/// - the book and the patron must exist
/// - the book must be available, whoever asks for it
///
/// The flag change and the new open record are committed together. If another
/// request borrows the same book first, the commit writes nothing and the call
/// fails as already borrowed.
pub async fn borrow_book(deps: &ServiceDependencies, cmd: BorrowBook) -> Result<BorrowingRecord> {
    // 1. Book and patron
    let (book, patron) = load_parties(deps, cmd.book_id, cmd.patron_id).await?;

    // 2. Transition (pure)
    let transition = domain::lending::borrow_book(&book, &patron, cmd.borrowed_on);
    if let Err(e) = &transition {
        tracing::warn!(book_id = %cmd.book_id, patron_id = %cmd.patron_id, "borrow refused: {}", e);
    }
    let (borrowed_book, new_record) = transition?;

    // 3. Atomic commit
    let record = deps
        .borrowing_records
        .commit_borrow(&borrowed_book, new_record)
        .await
        .map_err(ApplicationError::BorrowingRecordRepositoryError)?
        .ok_or_else(|| {
            tracing::warn!(book_id = %cmd.book_id, "borrow lost to a concurrent request");
            ApplicationError::BookAlreadyBorrowed(cmd.book_id)
        })?;

    tracing::info!(
        book_id = %record.book_id,
        patron_id = %record.patron_id,
        record_id = %record.id,
        "book borrowed"
    );
    Ok(record)
}

/// Takes a book back from a patron.
///
/// Business rules:
/// - the book and the patron must exist
/// - the book must currently be borrowed
/// - the patron must hold an open record for the book; the most recent one is
///   closed
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<BorrowingRecord> {
    // 1. Book and patron
    let (book, _patron) = load_parties(deps, cmd.book_id, cmd.patron_id).await?;

    // 2. Availability, before looking at the history
    if let Err(e) = domain::lending::ensure_returnable(&book) {
        tracing::warn!(book_id = %cmd.book_id, patron_id = %cmd.patron_id, "return refused: {}", e);
        return Err(e.into());
    }

    // 3. Open record of this patron
    let open_record = deps
        .borrowing_records
        .find_latest_open(cmd.book_id, cmd.patron_id)
        .await
        .map_err(ApplicationError::BorrowingRecordRepositoryError)?;
    let Some(record) = open_record else {
        return Err(missing_open_record(deps, &cmd).await);
    };

    // 4. Transition (pure)
    let (returned_book, closed_record) =
        domain::lending::return_book(&book, &record, cmd.returned_on)?;

    // 5. Atomic commit
    let record = deps
        .borrowing_records
        .commit_return(&returned_book, &closed_record)
        .await
        .map_err(ApplicationError::BorrowingRecordRepositoryError)?
        .ok_or_else(|| {
            tracing::warn!(book_id = %cmd.book_id, "return lost to a concurrent request");
            ApplicationError::BookAlreadyInStock(cmd.book_id)
        })?;

    tracing::info!(
        book_id = %record.book_id,
        patron_id = %record.patron_id,
        record_id = %record.id,
        "book returned"
    );
    Ok(record)
}

/// Error for a return that found no open record.
///
/// A concurrent return may have closed the loan after the availability check.
/// That case reports the book as in stock, the same as a second return would.
async fn missing_open_record(deps: &ServiceDependencies, cmd: &ReturnBook) -> ApplicationError {
    match deps.books.find_by_id(cmd.book_id).await {
        Ok(Some(book)) if !book.borrowed => ApplicationError::BookAlreadyInStock(cmd.book_id),
        Ok(_) => ApplicationError::NoActiveBorrowingRecord {
            book_id: cmd.book_id,
            patron_id: cmd.patron_id,
        },
        Err(e) => ApplicationError::BookRepositoryError(e),
    }
}

/// Whole lending history, oldest first
pub async fn list_borrowing_records(deps: &ServiceDependencies) -> Result<Vec<BorrowingRecord>> {
    deps.borrowing_records
        .find_all()
        .await
        .map_err(ApplicationError::BorrowingRecordRepositoryError)
}

use crate::domain::{Book, BookId, BorrowingRecord, NewBorrowingRecord, PatronId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Borrowing record repository port
///
/// Owns the append-only lending history and the atomic commits that keep
/// `Book::borrowed` in step with it.
#[async_trait]
pub trait BorrowingRecordRepository: Send + Sync {
    /// Whole lending history, ordered by id
    async fn find_all(&self) -> Result<Vec<BorrowingRecord>>;

    /// Referential guard for book deletion
    async fn exists_by_book_id(&self, book_id: BookId) -> Result<bool>;

    /// Referential guard for patron deletion
    async fn exists_by_patron_id(&self, patron_id: PatronId) -> Result<bool>;

    /// Most recent open record for the pair, by borrowing date then id.
    async fn find_latest_open(
        &self,
        book_id: BookId,
        patron_id: PatronId,
    ) -> Result<Option<BorrowingRecord>>;

    /// Atomically marks `book` as borrowed and inserts `record`.
    ///
    /// The flag is flipped only if the stored book is still available. When
    /// another request got there first nothing is written and `None` is
    /// returned.
    async fn commit_borrow(
        &self,
        book: &Book,
        record: NewBorrowingRecord,
    ) -> Result<Option<BorrowingRecord>>;

    /// Atomically marks `book` as available and stores the closed `record`.
    ///
    /// Both the stored record must still be open and the stored book still
    /// borrowed; otherwise nothing is written and `None` is returned.
    async fn commit_return(
        &self,
        book: &Book,
        record: &BorrowingRecord,
    ) -> Result<Option<BorrowingRecord>>;
}

use super::{InMemoryStore, next_id};
use crate::domain::{Book, BookId, BorrowingRecord, BorrowingRecordId, NewBorrowingRecord, PatronId};
use crate::ports::borrowing_record_repository::{
    BorrowingRecordRepository as BorrowingRecordRepositoryTrait, Result,
};
use async_trait::async_trait;

/// In-memory implementation of BorrowingRecordRepository
///
/// Each commit checks and writes under a single lock acquisition.
#[derive(Debug, Clone)]
pub struct BorrowingRecordRepository {
    store: InMemoryStore,
}

impl BorrowingRecordRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BorrowingRecordRepositoryTrait for BorrowingRecordRepository {
    async fn find_all(&self) -> Result<Vec<BorrowingRecord>> {
        Ok(self
            .store
            .lock()?
            .borrowing_records
            .values()
            .cloned()
            .collect())
    }

    async fn exists_by_book_id(&self, book_id: BookId) -> Result<bool> {
        Ok(self
            .store
            .lock()?
            .borrowing_records
            .values()
            .any(|r| r.book_id == book_id))
    }

    async fn exists_by_patron_id(&self, patron_id: PatronId) -> Result<bool> {
        Ok(self
            .store
            .lock()?
            .borrowing_records
            .values()
            .any(|r| r.patron_id == patron_id))
    }

    async fn find_latest_open(
        &self,
        book_id: BookId,
        patron_id: PatronId,
    ) -> Result<Option<BorrowingRecord>> {
        Ok(self
            .store
            .lock()?
            .borrowing_records
            .values()
            .filter(|r| r.book_id == book_id && r.patron_id == patron_id && r.is_open())
            .max_by_key(|r| (r.borrowing_date, r.id))
            .cloned())
    }

    async fn commit_borrow(
        &self,
        book: &Book,
        record: NewBorrowingRecord,
    ) -> Result<Option<BorrowingRecord>> {
        let mut state = self.store.lock()?;

        match state.books.get_mut(&book.id) {
            Some(stored) if !stored.borrowed => stored.borrowed = true,
            Some(_) => return Ok(None),
            None => return Err(format!("book {} vanished during borrow", book.id).into()),
        }

        let id = BorrowingRecordId::new(next_id(&mut state.last_borrowing_record_id));
        let record = BorrowingRecord::open(id, record);
        state.borrowing_records.insert(id, record.clone());

        Ok(Some(record))
    }

    async fn commit_return(
        &self,
        book: &Book,
        record: &BorrowingRecord,
    ) -> Result<Option<BorrowingRecord>> {
        let mut state = self.store.lock()?;

        let book_borrowed = state.books.get(&book.id).is_some_and(|b| b.borrowed);
        let record_open = state
            .borrowing_records
            .get(&record.id)
            .is_some_and(BorrowingRecord::is_open);
        if !book_borrowed || !record_open {
            return Ok(None);
        }

        if let Some(stored) = state.books.get_mut(&book.id) {
            stored.borrowed = false;
        }
        state.borrowing_records.insert(record.id, record.clone());

        Ok(Some(record.clone()))
    }
}

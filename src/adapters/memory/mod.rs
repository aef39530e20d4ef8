//! In-memory adapters.
//!
//! All three repositories share one mutex-guarded state, so the lending
//! commits are atomic with respect to every other repository call.

pub mod book_repository;
pub mod borrowing_record_repository;
pub mod patron_repository;

pub use book_repository::BookRepository as InMemoryBookRepository;
pub use borrowing_record_repository::BorrowingRecordRepository as InMemoryBorrowingRecordRepository;
pub use patron_repository::PatronRepository as InMemoryPatronRepository;

use crate::domain::{Book, BookId, BorrowingRecord, BorrowingRecordId, Patron, PatronId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Default)]
struct LibraryState {
    books: BTreeMap<BookId, Book>,
    patrons: BTreeMap<PatronId, Patron>,
    borrowing_records: BTreeMap<BorrowingRecordId, BorrowingRecord>,
    last_book_id: i64,
    last_patron_id: i64,
    last_borrowing_record_id: i64,
}

/// Shared storage behind the in-memory repositories
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<LibraryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book_repository(&self) -> InMemoryBookRepository {
        InMemoryBookRepository::new(self.clone())
    }

    pub fn patron_repository(&self) -> InMemoryPatronRepository {
        InMemoryPatronRepository::new(self.clone())
    }

    pub fn borrowing_record_repository(&self) -> InMemoryBorrowingRecordRepository {
        InMemoryBorrowingRecordRepository::new(self.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, LibraryState>> {
        self.state
            .lock()
            .map_err(|e| format!("in-memory store poisoned: {}", e).into())
    }
}

/// Bumps `last` and returns the new value, like a database sequence.
fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

use crate::domain::{Book, BookId, NewBook};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Book repository port
///
/// Persists catalog entries. The `borrowed` flag is never written through this
/// port; it changes only inside `BorrowingRecordRepository` commits.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, ordered by id
    async fn find_all(&self) -> Result<Vec<Book>>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    async fn exists_by_id(&self, id: BookId) -> Result<bool>;

    /// Stores a new book. The store assigns the id; the book starts available.
    async fn insert(&self, book: NewBook) -> Result<Book>;

    /// Replaces the descriptive fields of book `id`.
    ///
    /// Returns `None` if no such book exists.
    async fn update(&self, id: BookId, details: &NewBook) -> Result<Option<Book>>;

    /// Returns `false` if there was nothing to delete.
    async fn delete_by_id(&self, id: BookId) -> Result<bool>;
}

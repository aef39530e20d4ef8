use super::{InMemoryStore, next_id};
use crate::domain::{Book, BookId, NewBook};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;

/// In-memory implementation of BookRepository
#[derive(Debug, Clone)]
pub struct BookRepository {
    store: InMemoryStore,
}

impl BookRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.store.lock()?.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self.store.lock()?.books.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: BookId) -> Result<bool> {
        Ok(self.store.lock()?.books.contains_key(&id))
    }

    async fn insert(&self, book: NewBook) -> Result<Book> {
        let mut state = self.store.lock()?;
        let id = BookId::new(next_id(&mut state.last_book_id));
        let book = Book::register(id, book);
        state.books.insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: BookId, details: &NewBook) -> Result<Option<Book>> {
        let mut state = self.store.lock()?;
        let Some(stored) = state.books.get_mut(&id) else {
            return Ok(None);
        };
        *stored = stored.clone().with_details(details.clone());
        Ok(Some(stored.clone()))
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool> {
        Ok(self.store.lock()?.books.remove(&id).is_some())
    }
}

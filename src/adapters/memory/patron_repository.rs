use super::{InMemoryStore, next_id};
use crate::domain::{NewPatron, Patron, PatronId};
use crate::ports::patron_repository::{PatronRepository as PatronRepositoryTrait, Result};
use async_trait::async_trait;

/// In-memory implementation of PatronRepository
#[derive(Debug, Clone)]
pub struct PatronRepository {
    store: InMemoryStore,
}

impl PatronRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PatronRepositoryTrait for PatronRepository {
    async fn find_all(&self) -> Result<Vec<Patron>> {
        Ok(self.store.lock()?.patrons.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PatronId) -> Result<Option<Patron>> {
        Ok(self.store.lock()?.patrons.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: PatronId) -> Result<bool> {
        Ok(self.store.lock()?.patrons.contains_key(&id))
    }

    async fn insert(&self, patron: NewPatron) -> Result<Patron> {
        let mut state = self.store.lock()?;
        let id = PatronId::new(next_id(&mut state.last_patron_id));
        let patron = Patron::register(id, patron);
        state.patrons.insert(id, patron.clone());
        Ok(patron)
    }

    async fn update(&self, id: PatronId, details: &NewPatron) -> Result<Option<Patron>> {
        let mut state = self.store.lock()?;
        let Some(stored) = state.patrons.get_mut(&id) else {
            return Ok(None);
        };
        *stored = Patron::register(id, details.clone());
        Ok(Some(stored.clone()))
    }

    async fn delete_by_id(&self, id: PatronId) -> Result<bool> {
        Ok(self.store.lock()?.patrons.remove(&id).is_some())
    }
}

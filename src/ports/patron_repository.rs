use crate::domain::{NewPatron, Patron, PatronId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Patron repository port
#[async_trait]
pub trait PatronRepository: Send + Sync {
    /// All patrons, ordered by id
    async fn find_all(&self) -> Result<Vec<Patron>>;

    async fn find_by_id(&self, id: PatronId) -> Result<Option<Patron>>;

    async fn exists_by_id(&self, id: PatronId) -> Result<bool>;

    async fn insert(&self, patron: NewPatron) -> Result<Patron>;

    /// Returns `None` if no such patron exists.
    async fn update(&self, id: PatronId, details: &NewPatron) -> Result<Option<Patron>>;

    /// Returns `false` if there was nothing to delete.
    async fn delete_by_id(&self, id: PatronId) -> Result<bool>;
}

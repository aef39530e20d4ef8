use crate::application::{ApplicationError, Result, ServiceDependencies};
use crate::domain::{NewPatron, Patron, PatronId};

pub async fn list_patrons(deps: &ServiceDependencies) -> Result<Vec<Patron>> {
    deps.patrons
        .find_all()
        .await
        .map_err(ApplicationError::PatronRepositoryError)
}

pub async fn get_patron(deps: &ServiceDependencies, id: PatronId) -> Result<Patron> {
    deps.patrons
        .find_by_id(id)
        .await
        .map_err(ApplicationError::PatronRepositoryError)?
        .ok_or(ApplicationError::PatronNotFound(id))
}

pub async fn add_patron(deps: &ServiceDependencies, patron: NewPatron) -> Result<Patron> {
    let patron = deps
        .patrons
        .insert(patron)
        .await
        .map_err(ApplicationError::PatronRepositoryError)?;

    tracing::info!(patron_id = %patron.id, "patron added");
    Ok(patron)
}

pub async fn update_patron(
    deps: &ServiceDependencies,
    id: PatronId,
    details: NewPatron,
) -> Result<Patron> {
    let exists = deps
        .patrons
        .exists_by_id(id)
        .await
        .map_err(ApplicationError::PatronRepositoryError)?;
    if !exists {
        return Err(ApplicationError::PatronNotFound(id));
    }

    deps.patrons
        .update(id, &details)
        .await
        .map_err(ApplicationError::PatronRepositoryError)?
        .ok_or(ApplicationError::PatronNotFound(id))
}

/// Deletes a patron without lending history. A missing id is not an error.
pub async fn delete_patron(deps: &ServiceDependencies, id: PatronId) -> Result<()> {
    let referenced = deps
        .borrowing_records
        .exists_by_patron_id(id)
        .await
        .map_err(ApplicationError::BorrowingRecordRepositoryError)?;
    if referenced {
        tracing::warn!(patron_id = %id, "refusing to delete patron with borrowing records");
        return Err(ApplicationError::PatronHasBorrowingRecords(id));
    }

    let deleted = deps
        .patrons
        .delete_by_id(id)
        .await
        .map_err(ApplicationError::PatronRepositoryError)?;
    if deleted {
        tracing::info!(patron_id = %id, "patron deleted");
    } else {
        tracing::debug!(patron_id = %id, "no patron to delete");
    }
    Ok(())
}

use crate::application::{ApplicationError, Result, ServiceDependencies};
use crate::domain::{Book, BookId, NewBook};

pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.books
        .find_all()
        .await
        .map_err(ApplicationError::BookRepositoryError)
}

pub async fn get_book(deps: &ServiceDependencies, id: BookId) -> Result<Book> {
    deps.books
        .find_by_id(id)
        .await
        .map_err(ApplicationError::BookRepositoryError)?
        .ok_or(ApplicationError::BookNotFound(id))
}

/// Adds a book to the catalog. New books start available.
pub async fn add_book(deps: &ServiceDependencies, book: NewBook) -> Result<Book> {
    let book = deps
        .books
        .insert(book)
        .await
        .map_err(ApplicationError::BookRepositoryError)?;

    tracing::info!(book_id = %book.id, "book added");
    Ok(book)
}

/// Replaces the descriptive fields of a book.
///
/// The `borrowed` flag belongs to the lending workflow and is preserved.
pub async fn update_book(deps: &ServiceDependencies, id: BookId, details: NewBook) -> Result<Book> {
    let exists = deps
        .books
        .exists_by_id(id)
        .await
        .map_err(ApplicationError::BookRepositoryError)?;
    if !exists {
        return Err(ApplicationError::BookNotFound(id));
    }

    // the row may still disappear between the two calls
    deps.books
        .update(id, &details)
        .await
        .map_err(ApplicationError::BookRepositoryError)?
        .ok_or(ApplicationError::BookNotFound(id))
}

/// Deletes a book that has never been borrowed.
///
/// Deleting an id that is not in the catalog succeeds and changes nothing.
pub async fn delete_book(deps: &ServiceDependencies, id: BookId) -> Result<()> {
    let referenced = deps
        .borrowing_records
        .exists_by_book_id(id)
        .await
        .map_err(ApplicationError::BorrowingRecordRepositoryError)?;
    if referenced {
        tracing::warn!(book_id = %id, "refusing to delete book with borrowing records");
        return Err(ApplicationError::BookHasBorrowingRecords(id));
    }

    let deleted = deps
        .books
        .delete_by_id(id)
        .await
        .map_err(ApplicationError::BookRepositoryError)?;
    if deleted {
        tracing::info!(book_id = %id, "book deleted");
    } else {
        tracing::debug!(book_id = %id, "no book to delete");
    }
    Ok(())
}

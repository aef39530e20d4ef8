//! Catalog CRUD for books and patrons.
//!
//! Deletion is guarded by the lending history: an entity referenced by any
//! borrowing record cannot be removed.

mod book_service;
mod patron_service;

pub use book_service::{add_book, delete_book, get_book, list_books, update_book};
pub use patron_service::{add_patron, delete_patron, get_patron, list_patrons, update_patron};

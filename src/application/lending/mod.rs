mod lending_service;

pub use lending_service::{borrow_book, list_borrowing_records, return_book};

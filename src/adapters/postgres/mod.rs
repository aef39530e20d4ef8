pub mod book_repository;
pub mod borrowing_record_repository;
pub mod patron_repository;

pub use book_repository::BookRepository as PostgresBookRepository;
pub use borrowing_record_repository::BorrowingRecordRepository as PostgresBorrowingRecordRepository;
pub use patron_repository::PatronRepository as PostgresPatronRepository;

pub mod book;
pub mod borrowing_record;
pub mod commands;
pub mod errors;
pub mod lending;
pub mod patron;
pub mod value_objects;

pub use book::{Book, NewBook};
pub use borrowing_record::{BorrowingRecord, NewBorrowingRecord};
pub use errors::*;
pub use patron::{NewPatron, Patron};
pub use value_objects::*;

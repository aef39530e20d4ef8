pub mod catalog;
mod errors;
pub mod lending;

pub use errors::{ApplicationError, ErrorKind, Result};

use crate::ports::*;
use std::sync::Arc;

/// Service dependencies
///
/// Plain data: the catalog and lending functions receive it explicitly instead
/// of holding repositories themselves.
#[derive(Clone)]
pub struct ServiceDependencies {
    pub books: Arc<dyn BookRepository>,
    pub patrons: Arc<dyn PatronRepository>,
    pub borrowing_records: Arc<dyn BorrowingRecordRepository>,
}

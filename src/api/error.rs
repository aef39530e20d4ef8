use crate::application::{ApplicationError, ErrorKind};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API layer error
///
/// Wraps application errors and malformed requests and maps them to HTTP
/// responses. This is the only place status codes are chosen.
#[derive(Debug)]
pub enum ApiError {
    Application(ApplicationError),
    /// Body or path could not be parsed
    BadRequest(String),
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn error_code(err: &ApplicationError) -> &'static str {
    match err {
        ApplicationError::BookNotFound(_) => "BOOK_NOT_FOUND",
        ApplicationError::PatronNotFound(_) => "PATRON_NOT_FOUND",
        ApplicationError::NoActiveBorrowingRecord { .. } => "NO_ACTIVE_BORROWING_RECORD",
        ApplicationError::BookAlreadyBorrowed(_) => "BOOK_ALREADY_BORROWED",
        ApplicationError::BookAlreadyInStock(_) => "BOOK_ALREADY_IN_STOCK",
        ApplicationError::BookHasBorrowingRecords(_)
        | ApplicationError::PatronHasBorrowingRecords(_) => "HAS_BORROWING_RECORDS",
        ApplicationError::Validation(_) => "VALIDATION_ERROR",
        ApplicationError::BookRepositoryError(_)
        | ApplicationError::PatronRepositoryError(_)
        | ApplicationError::BorrowingRecordRepositoryError(_) => "INTERNAL_ERROR",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => {
                let body = ErrorResponse::new("BAD_REQUEST", msg);
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Application(err) => {
                let status = match err.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Conflict => StatusCode::CONFLICT,
                    ErrorKind::Validation => StatusCode::BAD_REQUEST,
                    ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
                };

                let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    // details stay in the log
                    tracing::error!(error = ?err, "{}", err);
                    "An unexpected error occurred while serving the request".to_string()
                } else {
                    err.to_string()
                };
                (status, ErrorResponse::new(error_code(&err), message))
            }
        };

        (status, Json(body)).into_response()
    }
}

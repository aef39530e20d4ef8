use crate::application::{ApplicationError, ServiceDependencies, catalog, lending};
use crate::domain::{
    BookId, PatronId,
    commands::{BorrowBook, ReturnBook},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{BookRequest, BookResponse, BorrowingRecordResponse, PatronRequest, PatronResponse},
};

// ============================================================================
// State
// ============================================================================

/// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// Today's date for lending commands
fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

// ============================================================================
// Books
// ============================================================================

/// GET /api/books
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = catalog::list_books(&state.service_deps).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /api/books/:id
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let Path(id) = path?;
    let book = catalog::get_book(&state.service_deps, BookId::new(id)).await?;
    Ok(Json(book.into()))
}

/// POST /api/books
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let Json(req) = payload?;
    let new_book = req.to_new_book().map_err(ApplicationError::from)?;

    let book = catalog::add_book(&state.service_deps, new_book).await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

/// PUT /api/books/:id - full replacement of the descriptive fields
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let details = req.to_new_book().map_err(ApplicationError::from)?;

    let book = catalog::update_book(&state.service_deps, BookId::new(id), details).await?;
    Ok(Json(book.into()))
}

/// DELETE /api/books/:id
///
/// 409 while any borrowing record references the book.
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    catalog::delete_book(&state.service_deps, BookId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Patrons
// ============================================================================

/// GET /api/patrons
pub async fn list_patrons(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PatronResponse>>, ApiError> {
    let patrons = catalog::list_patrons(&state.service_deps).await?;
    let body: Vec<PatronResponse> = patrons.into_iter().map(PatronResponse::from).collect();
    Ok(Json(body))
}

/// GET /api/patrons/:id
pub async fn get_patron(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PatronResponse>, ApiError> {
    let Path(id) = path?;
    let patron = catalog::get_patron(&state.service_deps, PatronId::new(id)).await?;
    Ok(Json(patron.into()))
}

/// POST /api/patrons
pub async fn create_patron(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PatronRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PatronResponse>), ApiError> {
    let Json(req) = payload?;
    let new_patron = req.to_new_patron().map_err(ApplicationError::from)?;

    let patron = catalog::add_patron(&state.service_deps, new_patron).await?;
    Ok((StatusCode::CREATED, Json(patron.into())))
}

/// PUT /api/patrons/:id
pub async fn update_patron(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PatronRequest>, JsonRejection>,
) -> Result<Json<PatronResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let details = req.to_new_patron().map_err(ApplicationError::from)?;

    let patron = catalog::update_patron(&state.service_deps, PatronId::new(id), details).await?;
    Ok(Json(patron.into()))
}

/// DELETE /api/patrons/:id
pub async fn delete_patron(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    catalog::delete_patron(&state.service_deps, PatronId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Lending
// ============================================================================

/// POST /api/borrow/:book_id/patron/:patron_id
///
/// 201 with the new open record, 409 if the book is out, 404 if the book or
/// the patron does not exist.
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<(StatusCode, Json<BorrowingRecordResponse>), ApiError> {
    let Path((book_id, patron_id)) = path?;
    let cmd = BorrowBook {
        book_id: BookId::new(book_id),
        patron_id: PatronId::new(patron_id),
        borrowed_on: today(),
    };

    let record = lending::borrow_book(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// PUT /api/return/:book_id/patron/:patron_id
///
/// 200 with the closed record, 409 if the book is on the shelf, 404 if the
/// book, the patron or an open record for the pair is missing.
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<BorrowingRecordResponse>, ApiError> {
    let Path((book_id, patron_id)) = path?;
    let cmd = ReturnBook {
        book_id: BookId::new(book_id),
        patron_id: PatronId::new(patron_id),
        returned_on: today(),
    };

    let record = lending::return_book(&state.service_deps, cmd).await?;
    Ok(Json(record.into()))
}

/// GET /api/borrowing-records
pub async fn list_borrowing_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BorrowingRecordResponse>>, ApiError> {
    let records = lending::list_borrowing_records(&state.service_deps).await?;
    Ok(Json(
        records
            .into_iter()
            .map(BorrowingRecordResponse::from)
            .collect(),
    ))
}

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, borrow_book, create_book, create_patron, delete_book, delete_patron, get_book,
    get_patron, list_books, list_borrowing_records, list_patrons, return_book, update_book,
    update_patron,
};

/// Creates the API router
///
/// Catalog:
/// - GET/POST /api/books, GET/PUT/DELETE /api/books/:id
/// - GET/POST /api/patrons, GET/PUT/DELETE /api/patrons/:id
///
/// Lending:
/// - POST /api/borrow/:book_id/patron/:patron_id
/// - PUT /api/return/:book_id/patron/:patron_id
/// - GET /api/borrowing-records
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Catalog
        .route("/api/books", get(list_books).post(create_book))
        .route(
            "/api/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/patrons", get(list_patrons).post(create_patron))
        .route(
            "/api/patrons/:id",
            get(get_patron).put(update_patron).delete(delete_patron),
        )
        // Lending
        .route("/api/borrow/:book_id/patron/:patron_id", post(borrow_book))
        .route("/api/return/:book_id/patron/:patron_id", put(return_book))
        .route("/api/borrowing-records", get(list_borrowing_records))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

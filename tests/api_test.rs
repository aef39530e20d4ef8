use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use library_catalog::api::handlers::AppState;
use library_catalog::api::router::create_router;
use library_catalog::api::types::*;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// Helpers
// ============================================================================

/// Router over a fresh in-memory store
fn setup_app() -> Router {
    let app_state = Arc::new(AppState {
        service_deps: common::memory_deps(),
    });
    create_router(app_state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<String>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn create_book(app: &Router) -> BookResponse {
    let request = json!({
        "title": "Sample Title",
        "author": "Sample Author",
        "publicationYear": 2021,
        "isbn": "1234567890",
    });
    let response = send(app, "POST", "/api/books", Some(request.to_string())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

async fn create_patron(app: &Router) -> PatronResponse {
    let request = json!({
        "name": "Sample Patron",
        "contactInformation": "patron@example.org",
    });
    let response = send(app, "POST", "/api/patrons", Some(request.to_string())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

// ============================================================================
// Lending flow
// ============================================================================

#[tokio::test]
async fn test_borrow_and_return_flow() {
    let app = setup_app();
    let book = create_book(&app).await;
    let patron = create_patron(&app).await;
    let borrow_uri = format!("/api/borrow/{}/patron/{}", book.id, patron.id);
    let return_uri = format!("/api/return/{}/patron/{}", book.id, patron.id);

    // Step 1: borrow
    let response = send(&app, "POST", &borrow_uri, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record: BorrowingRecordResponse = read_json(response).await;
    assert_eq!(record.book_id, book.id);
    assert_eq!(record.patron_id, patron.id);
    assert_eq!(record.return_date, None);

    let response = send(&app, "GET", &format!("/api/books/{}", book.id), None).await;
    let fetched: BookResponse = read_json(response).await;
    assert!(fetched.borrowed);

    // Step 2: borrowing again is a conflict
    let response = send(&app, "POST", &borrow_uri, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_ALREADY_BORROWED");
    assert_eq!(
        error.message,
        format!(
            "Book with id: {} is already borrowed at the moment",
            book.id
        )
    );

    // Step 3: return
    let response = send(&app, "PUT", &return_uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let closed: BorrowingRecordResponse = read_json(response).await;
    assert_eq!(closed.id, record.id);
    assert!(closed.return_date.is_some());
    assert!(closed.return_date >= Some(closed.borrowing_date));

    // Step 4: returning again is a conflict
    let response = send(&app, "PUT", &return_uri, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_ALREADY_IN_STOCK");

    let response = send(&app, "GET", "/api/borrowing-records", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let records: Vec<BorrowingRecordResponse> = read_json(response).await;
    assert_eq!(records, vec![closed]);
}

#[tokio::test]
async fn test_borrow_unknown_patron_is_not_found() {
    let app = setup_app();
    let book = create_book(&app).await;

    let uri = format!("/api/borrow/{}/patron/77", book.id);
    let response = send(&app, "POST", &uri, None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "PATRON_NOT_FOUND");
    assert!(error.message.contains("77"));
}

#[tokio::test]
async fn test_return_without_loan_by_patron_is_not_found() {
    let app = setup_app();
    let book = create_book(&app).await;
    let borrower = create_patron(&app).await;
    let other = create_patron(&app).await;

    let response = send(
        &app,
        "POST",
        &format!("/api/borrow/{}/patron/{}", book.id, borrower.id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        "PUT",
        &format!("/api/return/{}/patron/{}", book.id, other.id),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "NO_ACTIVE_BORROWING_RECORD");
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_get_missing_book_is_not_found() {
    let app = setup_app();

    let response = send(&app, "GET", "/api/books/12345", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_NOT_FOUND");
    assert_eq!(error.message, "Book not found with id: 12345");
}

#[tokio::test]
async fn test_update_book_ignores_borrowed_in_body() {
    let app = setup_app();
    let book = create_book(&app).await;

    let request = json!({
        "id": 999,
        "title": "Updated Title",
        "author": "Updated Author",
        "publicationYear": 1999,
        "isbn": "9780441172719",
        "borrowed": true,
    });
    let response = send(
        &app,
        "PUT",
        &format!("/api/books/{}", book.id),
        Some(request.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated: BookResponse = read_json(response).await;
    assert_eq!(updated.id, book.id);
    assert_eq!(updated.title, "Updated Title");
    assert_eq!(updated.publication_year, 1999);
    assert!(!updated.borrowed);
}

#[tokio::test]
async fn test_delete_book() {
    let app = setup_app();
    let book = create_book(&app).await;
    let uri = format!("/api/books/{}", book.id);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // deleting again is still a success
    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", "/api/patrons/4242", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_referenced_book_is_conflict() {
    let app = setup_app();
    let book = create_book(&app).await;
    let patron = create_patron(&app).await;
    send(
        &app,
        "POST",
        &format!("/api/borrow/{}/patron/{}", book.id, patron.id),
        None,
    )
    .await;

    let response = send(&app, "DELETE", &format!("/api/books/{}", book.id), None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "HAS_BORROWING_RECORDS");

    let uri = format!("/api/patrons/{}", patron.id);
    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(&app, "GET", "/api/books", None).await;
    let books: Vec<BookResponse> = read_json(response).await;
    assert_eq!(books.len(), 1);
}

#[tokio::test]
async fn test_invalid_bodies_are_bad_request() {
    let app = setup_app();

    // malformed JSON
    let response = send(&app, "POST", "/api/books", Some("{\"title\":".to_string())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BAD_REQUEST");

    // well-formed but blank
    let request = json!({ "name": "  ", "contactInformation": "x@example.org" });
    let response = send(&app, "POST", "/api/patrons", Some(request.to_string())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "VALIDATION_ERROR");

    let response = send(&app, "GET", "/api/patrons", None).await;
    let patrons: Vec<PatronResponse> = read_json(response).await;
    assert!(patrons.is_empty());
}

#[tokio::test]
async fn test_non_numeric_path_id_is_json_bad_request() {
    let app = setup_app();

    for (method, uri) in [
        ("GET", "/api/books/abc"),
        ("DELETE", "/api/patrons/abc"),
        ("POST", "/api/borrow/x/patron/1"),
    ] {
        let response = send(&app, method, uri, None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error, "BAD_REQUEST");
        assert!(!error.message.is_empty());
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

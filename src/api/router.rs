use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, create_loan, get_book_by_id, get_catalog, get_session, get_similar_books,
    go_back, list_loans, open_loans, return_loan, select_book, set_author_filter,
    view_book_details,
};

/// Creates the API router with all catalog, session and loan endpoints
///
/// Command endpoints (Write operations):
/// - POST /books - Add a book to the catalog
/// - POST /books/:id/select - Toggle the selection of a book
/// - POST /books/:id/view - Open the details screen for a book
/// - POST /session/loans - Open the loan management screen
/// - POST /session/back - Go back to the catalog screen
/// - POST /session/filter - Set the author filter
/// - POST /loans - Borrow a book
/// - POST /loans/:id/return - Return a loan
///
/// Query endpoints (Read operations):
/// - GET /session - Session snapshot (view, selection, filter, similar books)
/// - GET /catalog - Filtered book list and author selector entries
/// - GET /books/:id - Book details
/// - GET /session/similar - Similar-books lookup state
/// - GET /loans - Loan screen payload: available books and loans
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Command endpoints (Write operations)
        .route("/books", post(add_book))
        .route("/books/:id/select", post(select_book))
        .route("/books/:id/view", post(view_book_details))
        .route("/session/loans", post(open_loans))
        .route("/session/back", post(go_back))
        .route("/session/filter", post(set_author_filter))
        .route("/loans", post(create_loan).get(list_loans))
        .route("/loans/:id/return", post(return_loan))
        // Query endpoints (Read operations)
        .route("/session", get(get_session))
        .route("/catalog", get(get_catalog))
        .route("/books/:id", get(get_book_by_id))
        .route("/session/similar", get(get_similar_books))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

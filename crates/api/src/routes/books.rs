//! Route definitions for the catalog service.

use axum::routing::get;
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// Book routes.
///
/// ```text
/// GET    /catalog        -> list_books
/// POST   /catalog        -> create_book
/// GET    /catalog/{id}   -> get_book
/// PUT    /catalog/{id}   -> update_book
/// DELETE /catalog/{id}   -> delete_book
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(books::list_books).post(books::create_book))
        .route(
            "/catalog/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
}

//! HTTP surface of the bookstore
//!
//! CRUD routes live under `/api/books`; `/authors` and `/years` serve the
//! aggregations.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ErrorResponse, WebError, WebResult};
pub use state::AppState;

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::healthcheck))
        .route(
            "/api/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/api/books/:id",
            put(handlers::update_book).delete(handlers::delete_book),
        )
        .route("/authors", get(handlers::list_authors))
        .route("/years", get(handlers::list_years))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

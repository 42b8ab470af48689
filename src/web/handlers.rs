use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use tracing::{debug, info};

use super::error::{WebError, WebResult};
use super::state::AppState;
use crate::aggregate::{self, AuthorGroup, YearGroup};
use crate::core::{Book, BookFilter, BookUpdate};

const INVALID_REQUEST: &str = "Invalid request";
const MISSING_FIELDS: &str = "Missing required fields: id and title";
const DUPLICATE_ENTRY: &str = "Duplicate entry";
const BOOK_NOT_FOUND: &str = "Book not found";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

pub async fn healthcheck() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub async fn list_books(State(state): State<AppState>) -> WebResult<Json<Vec<Book>>> {
    let books = state.store.find_all().await?;
    Ok(Json(books))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> WebResult<StatusCode> {
    let Json(book) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected book payload");
        WebError::bad_request(INVALID_REQUEST)
    })?;

    if book.id.is_empty() || book.title.is_empty() {
        return Err(WebError::bad_request(MISSING_FIELDS));
    }

    if state.store.count(&BookFilter::by_id(&book.id)).await? > 0 {
        return Err(WebError::conflict(DUPLICATE_ENTRY));
    }

    info!(id = %book.id, title = %book.title, "creating book");
    state.store.insert_one(book).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookUpdate>, JsonRejection>,
) -> WebResult<StatusCode> {
    let Json(update) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected book update payload");
        WebError::bad_request(INVALID_REQUEST)
    })?;

    let matched = state
        .store
        .update_one(&BookFilter::by_id(&id), &update)
        .await?;
    if matched == 0 {
        return Err(WebError::not_found(BOOK_NOT_FOUND));
    }

    info!(id = %id, "updated book");
    Ok(StatusCode::OK)
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    let deleted = state.store.delete_one(&BookFilter::by_id(&id)).await?;
    if deleted == 0 {
        return Err(WebError::not_found(BOOK_NOT_FOUND));
    }

    info!(id = %id, "deleted book");
    Ok(StatusCode::OK)
}

pub async fn list_authors(State(state): State<AppState>) -> WebResult<Json<Vec<AuthorGroup>>> {
    let groups = aggregate::authors(state.store.as_ref()).await?;
    Ok(Json(groups))
}

pub async fn list_years(State(state): State<AppState>) -> WebResult<Json<Vec<YearGroup>>> {
    let groups = aggregate::years(state.store.as_ref()).await?;
    Ok(Json(groups))
}

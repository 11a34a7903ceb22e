//! Handlers for the `/catalog` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use libris_core::catalog::{self, BOOK_FIELDS};
use libris_core::error::CoreError;
use libris_core::field_update::UpdateSet;
use libris_core::payload::{non_empty_object, NO_DATA_PROVIDED};
use libris_db::models::book::{Book, CreateBook};
use libris_db::repositories::BookRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{OptionalJson, ResourceId};
use crate::handlers::{insert_applied, update_applied};
use crate::response::{BookList, CreatedResponse, MessageResponse};
use crate::state::AppState;

/// GET /catalog
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BookList>> {
    let books = BookRepo::list(&state.pool).await?;
    Ok(Json(BookList { books }))
}

/// GET /catalog/{id}
pub async fn get_book(
    State(state): State<AppState>,
    ResourceId(book_id): ResourceId,
) -> AppResult<Json<Book>> {
    let book = BookRepo::find_by_id(&state.pool, book_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: catalog::ENTITY,
            id: book_id,
        }))?;

    Ok(Json(book))
}

/// POST /catalog
///
/// Requires `title` and `author`; returns 201 with the generated id.
pub async fn create_book(
    State(state): State<AppState>,
    OptionalJson(payload): OptionalJson,
) -> AppResult<impl IntoResponse> {
    let body = non_empty_object(payload)
        .ok_or_else(|| CoreError::Validation(catalog::REQUIRED_FIELDS_MESSAGE.to_string()))?;
    catalog::validate_new_book(&body)?;

    let input: CreateBook = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::BadRequest(format!("Invalid book payload: {e}")))?;

    let id = insert_applied(BookRepo::create(&state.pool, &input).await?, catalog::ENTITY)?;

    tracing::info!(book_id = id, title = %input.title, "Book created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /catalog/{id}
///
/// Partial update: only the recognized fields present in the body are
/// written.
pub async fn update_book(
    State(state): State<AppState>,
    ResourceId(book_id): ResourceId,
    OptionalJson(payload): OptionalJson,
) -> AppResult<Json<MessageResponse>> {
    let body = non_empty_object(payload)
        .ok_or_else(|| CoreError::Validation(NO_DATA_PROVIDED.to_string()))?;
    let set = UpdateSet::from_json(BOOK_FIELDS, &body)?;

    let outcome = BookRepo::update(&state.pool, book_id, &set).await?;
    update_applied(outcome, catalog::ENTITY, book_id)?;

    tracing::info!(book_id, fields = ?set.field_names(), "Book updated");

    Ok(Json(MessageResponse {
        message: "Book updated successfully",
    }))
}

/// DELETE /catalog/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    ResourceId(book_id): ResourceId,
) -> AppResult<Json<MessageResponse>> {
    let deleted = BookRepo::delete(&state.pool, book_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: catalog::ENTITY,
            id: book_id,
        }));
    }

    tracing::info!(book_id, "Book deleted");

    Ok(Json(MessageResponse {
        message: "Book deleted successfully",
    }))
}

//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use libris_core::error::CoreError;
use libris_core::field_update::UpdateSet;
use libris_core::payload::{non_empty_object, NO_DATA_PROVIDED};
use libris_core::users::{self, USER_FIELDS};
use libris_db::models::user::{CreateUser, User};
use libris_db::repositories::UserRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{OptionalJson, ResourceId};
use crate::handlers::{insert_applied, update_applied};
use crate::response::{CreatedResponse, MessageResponse, UserList};
use crate::state::AppState;

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UserList>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(UserList { users }))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    ResourceId(user_id): ResourceId,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: users::ENTITY,
            id: user_id,
        }))?;

    Ok(Json(user))
}

/// POST /users
///
/// Requires `username` and `email`; both must be unused.
pub async fn create_user(
    State(state): State<AppState>,
    OptionalJson(payload): OptionalJson,
) -> AppResult<impl IntoResponse> {
    let body = non_empty_object(payload)
        .ok_or_else(|| CoreError::Validation(users::REQUIRED_FIELDS_MESSAGE.to_string()))?;
    users::validate_new_user(&body)?;

    let input: CreateUser = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::BadRequest(format!("Invalid user payload: {e}")))?;

    let id = insert_applied(UserRepo::create(&state.pool, &input).await?, users::ENTITY)?;

    tracing::info!(user_id = id, username = %input.username, "User created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    ResourceId(user_id): ResourceId,
    OptionalJson(payload): OptionalJson,
) -> AppResult<Json<MessageResponse>> {
    let body = non_empty_object(payload)
        .ok_or_else(|| CoreError::Validation(NO_DATA_PROVIDED.to_string()))?;
    let set = UpdateSet::from_json(USER_FIELDS, &body)?;

    let outcome = UserRepo::update(&state.pool, user_id, &set).await?;
    update_applied(outcome, users::ENTITY, user_id)?;

    tracing::info!(user_id, fields = ?set.field_names(), "User updated");

    Ok(Json(MessageResponse {
        message: "User updated successfully",
    }))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    ResourceId(user_id): ResourceId,
) -> AppResult<Json<MessageResponse>> {
    let deleted = UserRepo::delete(&state.pool, user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: users::ENTITY,
            id: user_id,
        }));
    }

    tracing::info!(user_id, "User deleted");

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

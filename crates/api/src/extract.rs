//! Request extractors that report failures in the JSON error format.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use libris_core::types::DbId;
use serde_json::Value;

use crate::error::AppError;

/// A positive integer id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub DbId);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        parse_id(&raw)
            .map(ResourceId)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid id '{raw}': expected a positive integer")))
    }
}

fn parse_id(raw: &str) -> Option<DbId> {
    raw.parse::<DbId>().ok().filter(|id| *id > 0)
}

/// A JSON request body that may be absent.
///
/// Yields `None` when the content type is not JSON (whatever the body holds)
/// or when the body is empty. A non-empty JSON body that fails to parse is a
/// 400 carrying the parser's message.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalJson(pub Option<Value>);

impl<S> FromRequest<S> for OptionalJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_body = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        if !json_body || bytes.is_empty() {
            return Ok(OptionalJson(None));
        }

        Json::<Value>::from_bytes(&bytes)
            .map(|Json(value)| OptionalJson(Some(value)))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

/// `application/json` or any `application/*+json`, ignoring parameters.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

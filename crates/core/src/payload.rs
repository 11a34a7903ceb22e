//! Helpers for request bodies that arrive as loose JSON.

use serde_json::{Map, Value};

use crate::error::CoreError;

pub const NO_DATA_PROVIDED: &str = "No data provided";
pub const NO_VALID_FIELDS: &str = "No valid fields to update";

/// Return the body as a JSON object if it is one and has at least one key.
///
/// Absent bodies, non-objects and `{}` all count as "no data".
pub fn non_empty_object(body: Option<Value>) -> Option<Map<String, Value>> {
    match body {
        Some(Value::Object(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

/// Ensure every key in `keys` is present in `body`, failing with `message`
/// otherwise. Presence is all that is checked here; value types are checked
/// by the entity's field table.
pub fn require_keys(
    body: &Map<String, Value>,
    keys: &[&str],
    message: &str,
) -> Result<(), CoreError> {
    if keys.iter().all(|key| body.contains_key(*key)) {
        Ok(())
    } else {
        Err(CoreError::Validation(message.to_string()))
    }
}

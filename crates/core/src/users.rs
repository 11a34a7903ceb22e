//! User field rules for the user service.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::field_update::{validate_fields, FieldKind, FieldSpec};
use crate::payload::require_keys;

pub const ENTITY: &str = "User";

pub const USERNAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 255;
pub const FULL_NAME_MAX_LEN: usize = 255;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Username and email are required";
pub const DUPLICATE_USERNAME_MESSAGE: &str = "Username already exists";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists";
pub const DUPLICATE_USER_MESSAGE: &str = "Username or email already exists";

/// Columns a client may set on a user. `created_at` is set by the database
/// and never listed here.
pub const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "username",
        FieldKind::RequiredText {
            max_len: USERNAME_MAX_LEN,
        },
    ),
    FieldSpec::new(
        "email",
        FieldKind::RequiredText {
            max_len: EMAIL_MAX_LEN,
        },
    ),
    FieldSpec::new(
        "full_name",
        FieldKind::NullableText {
            max_len: FULL_NAME_MAX_LEN,
        },
    ),
];

/// Validate a create-user body: `username` and `email` must be present, and
/// every recognized field must carry a value of the right kind.
pub fn validate_new_user(body: &Map<String, Value>) -> Result<(), CoreError> {
    require_keys(body, &["username", "email"], REQUIRED_FIELDS_MESSAGE)?;
    validate_fields(USER_FIELDS, body)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::field_update::UpdateSet;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn minimal_user_is_valid() {
        let body = object(json!({"username": "a", "email": "a@x.com"}));
        assert!(validate_new_user(&body).is_ok());
    }

    #[test]
    fn missing_email_is_rejected() {
        let body = object(json!({"username": "a"}));
        assert_matches!(
            validate_new_user(&body),
            Err(CoreError::Validation(msg)) if msg == REQUIRED_FIELDS_MESSAGE
        );
    }

    #[test]
    fn full_name_may_be_null() {
        let body = object(json!({"username": "a", "email": "a@x.com", "full_name": null}));
        assert!(validate_new_user(&body).is_ok());
    }

    #[test]
    fn created_at_is_not_updatable() {
        let body = object(json!({"created_at": "2020-01-01T00:00:00Z"}));
        assert!(UpdateSet::from_json(USER_FIELDS, &body).unwrap().is_empty());
    }
}

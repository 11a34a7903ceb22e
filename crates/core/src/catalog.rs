//! Book field rules for the catalog service.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::field_update::{validate_fields, FieldKind, FieldSpec};
use crate::payload::require_keys;

pub const ENTITY: &str = "Book";

pub const TITLE_MAX_LEN: usize = 255;
pub const AUTHOR_MAX_LEN: usize = 255;
pub const ISBN_MAX_LEN: usize = 20;
pub const PRICE_PRECISION: u32 = 10;
pub const PRICE_SCALE: u32 = 2;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Title and author are required";
pub const DUPLICATE_ISBN_MESSAGE: &str = "Book with this ISBN already exists";

/// Columns a client may set on a book, with their typed setters.
pub const BOOK_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "title",
        FieldKind::RequiredText {
            max_len: TITLE_MAX_LEN,
        },
    ),
    FieldSpec::new(
        "author",
        FieldKind::RequiredText {
            max_len: AUTHOR_MAX_LEN,
        },
    ),
    FieldSpec::new(
        "isbn",
        FieldKind::NullableText {
            max_len: ISBN_MAX_LEN,
        },
    ),
    FieldSpec::new("quantity", FieldKind::Integer),
    FieldSpec::new(
        "price",
        FieldKind::NullableDecimal {
            precision: PRICE_PRECISION,
            scale: PRICE_SCALE,
        },
    ),
];

/// Validate a create-book body: `title` and `author` must be present, and
/// every recognized field must carry a value of the right kind.
pub fn validate_new_book(body: &Map<String, Value>) -> Result<(), CoreError> {
    require_keys(body, &["title", "author"], REQUIRED_FIELDS_MESSAGE)?;
    validate_fields(BOOK_FIELDS, body)
}

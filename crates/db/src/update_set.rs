//! Renders a [`UpdateSet`] into the `SET` clause of an `UPDATE`.

use libris_core::field_update::{FieldValue, UpdateSet};
use sqlx::{Postgres, QueryBuilder};

/// Append `col = $n, col = $n, ...` for every assignment in `set`.
///
/// Column names come from the entity's static field table; values are always
/// bound as parameters.
pub fn push_assignments(builder: &mut QueryBuilder<'_, Postgres>, set: &UpdateSet) {
    let mut separated = builder.separated(", ");
    for (column, value) in set.iter() {
        separated.push(format!("{column} = "));
        match value {
            FieldValue::Text(text) => separated.push_bind_unseparated(text.clone()),
            FieldValue::NullableText(text) => separated.push_bind_unseparated(text.clone()),
            FieldValue::Integer(n) => separated.push_bind_unseparated(*n),
            FieldValue::Decimal(d) => separated.push_bind_unseparated(*d),
        };
    }
}

//! Field update sets: typed partial updates assembled from a JSON body.
//!
//! Each entity publishes a static table of [`FieldSpec`]s naming the columns
//! a client may touch and how each JSON value converts to a typed
//! [`FieldValue`]. [`UpdateSet::from_json`] walks that table, never the
//! request's keys, so every column name that reaches SQL comes from the
//! table. Keys not listed in the table are ignored.

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field table
// ---------------------------------------------------------------------------

/// How a recognized field converts from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-null, non-blank string of at most `max_len` characters.
    RequiredText { max_len: usize },
    /// String of at most `max_len` characters, or null.
    NullableText { max_len: usize },
    /// Non-null 32-bit integer.
    Integer,
    /// Number that fits `NUMERIC(precision, scale)`, or null.
    NullableDecimal { precision: u32, scale: u32 },
}

/// A recognized field name paired with its typed setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    /// Convert a raw JSON value into the typed value for this field.
    pub fn parse(&self, value: &Value) -> Result<FieldValue, CoreError> {
        match self.kind {
            FieldKind::RequiredText { max_len } => match value {
                Value::String(s) if !s.trim().is_empty() => {
                    self.check_len(s, max_len)?;
                    Ok(FieldValue::Text(s.clone()))
                }
                _ => Err(self.invalid("must be a non-empty string")),
            },
            FieldKind::NullableText { max_len } => match value {
                Value::Null => Ok(FieldValue::NullableText(None)),
                Value::String(s) => {
                    self.check_len(s, max_len)?;
                    Ok(FieldValue::NullableText(Some(s.clone())))
                }
                _ => Err(self.invalid("must be a string or null")),
            },
            FieldKind::Integer => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(FieldValue::Integer)
                .ok_or_else(|| self.invalid("must be an integer")),
            FieldKind::NullableDecimal { precision, scale } => match value {
                Value::Null => Ok(FieldValue::Decimal(None)),
                Value::Number(n) => {
                    let decimal = decimal_from_number(n)
                        .ok_or_else(|| self.invalid("must be a number or null"))?;
                    check_decimal_bounds(self.name, decimal, precision, scale)?;
                    Ok(FieldValue::Decimal(Some(decimal)))
                }
                _ => Err(self.invalid("must be a number or null")),
            },
        }
    }

    fn check_len(&self, s: &str, max_len: usize) -> Result<(), CoreError> {
        if s.chars().count() > max_len {
            return Err(self.invalid(&format!("must be at most {max_len} characters")));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> CoreError {
        CoreError::Validation(format!("{} {reason}", self.name))
    }
}

/// A typed value ready to be bound to a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    NullableText(Option<String>),
    Integer(i32),
    Decimal(Option<Decimal>),
}

// ---------------------------------------------------------------------------
// Update set
// ---------------------------------------------------------------------------

/// The recognized fields present in a request body, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    assignments: Vec<(&'static str, FieldValue)>,
}

impl UpdateSet {
    /// Build an update set from `body`, converting every field listed in
    /// `specs` that the body contains.
    ///
    /// Fails on the first value that does not match its field's kind.
    pub fn from_json(specs: &[FieldSpec], body: &Map<String, Value>) -> Result<Self, CoreError> {
        let mut assignments = Vec::new();
        for spec in specs {
            if let Some(value) = body.get(spec.name) {
                assignments.push((spec.name, spec.parse(value)?));
            }
        }
        Ok(Self { assignments })
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.assignments
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value)
    }

    /// Column names in the order they will appear in the `SET` clause.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(column, _)| *column).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.assignments.iter().map(|(column, value)| (*column, value))
    }
}

/// Check every recognized field in `body` without keeping the result.
pub fn validate_fields(specs: &[FieldSpec], body: &Map<String, Value>) -> Result<(), CoreError> {
    UpdateSet::from_json(specs, body).map(|_| ())
}

// ---------------------------------------------------------------------------
// Decimal helpers
// ---------------------------------------------------------------------------

/// Convert a JSON number to a [`Decimal`] using its textual form, so `9.99`
/// stays `9.99` rather than the nearest binary float.
pub fn decimal_from_number(n: &Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Reject values that would overflow a `NUMERIC(precision, scale)` column
/// once rounded to `scale` places.
pub fn check_decimal_bounds(
    name: &str,
    value: Decimal,
    precision: u32,
    scale: u32,
) -> Result<(), CoreError> {
    let limit = Decimal::from(10_i64.pow(precision - scale));
    if value.round_dp(scale).abs() >= limit {
        return Err(CoreError::Validation(format!(
            "{name} must be less than {limit} in absolute value"
        )));
    }
    Ok(())
}

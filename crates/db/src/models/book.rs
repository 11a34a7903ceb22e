//! Book model and create DTO.

use libris_core::types::DbId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `books` table.
///
/// `price` serializes as a JSON number (or null), not a string.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

/// DTO for inserting a book. Absent `quantity` defaults to 0 in SQL.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

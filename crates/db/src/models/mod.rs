//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//!
//! Partial updates do not have a DTO; they go through
//! [`libris_core::field_update::UpdateSet`].

pub mod book;
pub mod user;

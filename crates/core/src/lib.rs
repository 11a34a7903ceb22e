//! Domain layer shared by the catalog and user services.
//!
//! Holds the error taxonomy, id/timestamp aliases, request validation and the
//! field update set used to build partial updates. Nothing here touches the
//! network or the database.

pub mod catalog;
pub mod error;
pub mod field_update;
pub mod payload;
pub mod types;
pub mod users;

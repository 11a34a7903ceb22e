//! Response bodies shared by the handlers.
//!
//! Collections are wrapped in a field named after the resource
//! (`{"books": [...]}`); single records are returned bare.

use libris_core::types::DbId;
use libris_db::models::book::Book;
use libris_db::models::user::User;
use serde::Serialize;

/// `GET /catalog` body.
#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<Book>,
}

/// `GET /users` body.
#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
}

/// Body of a successful create: the generated id.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DbId,
}

/// Confirmation for updates and deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

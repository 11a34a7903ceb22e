//! Idempotent table creation, run once per process before serving traffic.

use crate::DbPool;

pub const BOOKS_DDL: &str = "\
    CREATE TABLE IF NOT EXISTS books ( \
        id BIGSERIAL PRIMARY KEY, \
        title VARCHAR(255) NOT NULL, \
        author VARCHAR(255) NOT NULL, \
        isbn VARCHAR(20), \
        quantity INTEGER NOT NULL DEFAULT 0, \
        price NUMERIC(10, 2), \
        CONSTRAINT uq_books_isbn UNIQUE (isbn) \
    )";

pub const USERS_DDL: &str = "\
    CREATE TABLE IF NOT EXISTS users ( \
        id BIGSERIAL PRIMARY KEY, \
        username VARCHAR(100) NOT NULL, \
        email VARCHAR(255) NOT NULL, \
        full_name VARCHAR(255), \
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
        CONSTRAINT uq_users_username UNIQUE (username), \
        CONSTRAINT uq_users_email UNIQUE (email) \
    )";

/// Ensure the `books` table exists.
pub async fn init_catalog_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(BOOKS_DDL).execute(pool).await?;
    tracing::debug!(table = "books", "Schema ensured");
    Ok(())
}

/// Ensure the `users` table exists.
pub async fn init_user_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(USERS_DDL).execute(pool).await?;
    tracing::debug!(table = "users", "Schema ensured");
    Ok(())
}

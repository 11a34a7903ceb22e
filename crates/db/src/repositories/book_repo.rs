//! Repository for the `books` table.

use libris_core::catalog::DUPLICATE_ISBN_MESSAGE;
use libris_core::field_update::UpdateSet;
use libris_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::book::{Book, CreateBook};
use crate::outcome::{unique_violation, WriteOutcome};
use crate::update_set::push_assignments;

/// Column list for `books` queries.
const COLUMNS: &str = "id, title, author, isbn, quantity, price";

/// Provides CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// List every book, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY id");
        sqlx::query_as::<_, Book>(&query).fetch_all(pool).await
    }

    /// Find a book by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new book, returning its generated id.
    ///
    /// A duplicate ISBN yields [`WriteOutcome::Conflict`]; the single-statement
    /// insert leaves no partial row behind.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBook,
    ) -> Result<WriteOutcome<DbId>, sqlx::Error> {
        let result = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO books (title, author, isbn, quantity, price) \
             VALUES ($1, $2, $3, COALESCE($4, 0), $5) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.isbn)
        .bind(input.quantity)
        .bind(input.price)
        .fetch_one(pool)
        .await;

        match result {
            Ok(id) => Ok(WriteOutcome::Applied(id)),
            Err(err) if unique_violation(&err).is_some() => {
                Ok(WriteOutcome::Conflict(DUPLICATE_ISBN_MESSAGE))
            }
            Err(err) => Err(err),
        }
    }

    /// Apply a partial update to a book.
    ///
    /// Runs in one transaction: the row is locked by an existence check,
    /// then only the columns in `set` are written. A missing row or an empty
    /// set rolls back without writing; a duplicate ISBN rolls back the
    /// whole update.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        set: &UpdateSet,
    ) -> Result<WriteOutcome<()>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_scalar::<_, DbId>("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_none() {
            tx.rollback().await?;
            return Ok(WriteOutcome::NotFound);
        }
        if set.is_empty() {
            tx.rollback().await?;
            return Ok(WriteOutcome::NothingToUpdate);
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE books SET ");
        push_assignments(&mut builder, set);
        builder.push(" WHERE id = ").push_bind(id);

        match builder.build().execute(&mut *tx).await {
            Ok(_) => {
                tx.commit().await?;
                Ok(WriteOutcome::Applied(()))
            }
            Err(err) if unique_violation(&err).is_some() => {
                tx.rollback().await?;
                Ok(WriteOutcome::Conflict(DUPLICATE_ISBN_MESSAGE))
            }
            Err(err) => Err(err),
        }
    }

    /// Delete a book by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let deleted = sqlx::query_scalar::<_, DbId>("DELETE FROM books WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(deleted.is_some())
    }
}

//! Repository for the `users` table.

use libris_core::field_update::UpdateSet;
use libris_core::types::DbId;
use libris_core::users::{
    DUPLICATE_EMAIL_MESSAGE, DUPLICATE_USERNAME_MESSAGE, DUPLICATE_USER_MESSAGE,
};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::user::{CreateUser, User};
use crate::outcome::{unique_violation, WriteOutcome};
use crate::update_set::push_assignments;

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, email, full_name, created_at";

const UQ_USERNAME: &str = "uq_users_username";
const UQ_EMAIL: &str = "uq_users_email";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// List every user, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Find a user by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new user, returning its generated id.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<WriteOutcome<DbId>, sqlx::Error> {
        let result = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO users (username, email, full_name) \
             VALUES ($1, $2, $3) \
             RETURNING id",
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.full_name)
        .fetch_one(pool)
        .await;

        match result {
            Ok(id) => Ok(WriteOutcome::Applied(id)),
            Err(err) => match unique_violation(&err) {
                Some(constraint) => Ok(WriteOutcome::Conflict(conflict_message(constraint))),
                None => Err(err),
            },
        }
    }

    /// Apply a partial update to a user inside one transaction.
    ///
    /// Same contract as [`crate::repositories::BookRepo::update`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        set: &UpdateSet,
    ) -> Result<WriteOutcome<()>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
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

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        push_assignments(&mut builder, set);
        builder.push(" WHERE id = ").push_bind(id);

        match builder.build().execute(&mut *tx).await {
            Ok(_) => {
                tx.commit().await?;
                Ok(WriteOutcome::Applied(()))
            }
            Err(err) => match unique_violation(&err) {
                Some(constraint) => {
                    let message = conflict_message(constraint);
                    tx.rollback().await?;
                    Ok(WriteOutcome::Conflict(message))
                }
                None => Err(err),
            },
        }
    }

    /// Delete a user by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Map a violated constraint to the message the client sees.
fn conflict_message(constraint: &str) -> &'static str {
    match constraint {
        UQ_USERNAME => DUPLICATE_USERNAME_MESSAGE,
        UQ_EMAIL => DUPLICATE_EMAIL_MESSAGE,
        _ => DUPLICATE_USER_MESSAGE,
    }
}

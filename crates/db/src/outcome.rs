//! Typed results for writes that can fail for domain reasons.

/// What happened when a repository attempted a write.
///
/// Infrastructure failures (lost connection, pool timeout) stay in the outer
/// `Result<_, sqlx::Error>`; everything a client can cause is a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome<T> {
    /// The write committed.
    Applied(T),
    /// No row has the requested id. Nothing was written.
    NotFound,
    /// A unique constraint rejected the write. The transaction was rolled back.
    Conflict(&'static str),
    /// The row exists but the request named no recognized field.
    NothingToUpdate,
}

/// Name of the unique constraint `err` violated, or `None` if `err` is not a
/// unique violation. Violations without a reported constraint yield `""`.
pub fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.constraint().unwrap_or(""))
        }
        _ => None,
    }
}

//! PostgreSQL data access for the catalog and user services.
//!
//! Pool creation (with bounded startup retry), the schema initializer, row
//! models, and one repository per table.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod models;
pub mod outcome;
pub mod repositories;
pub mod schema;
pub mod update_set;

pub use outcome::WriteOutcome;

pub type DbPool = sqlx::PgPool;

/// Sizing and timeouts for a connection pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Fixed-delay retry policy for the initial connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total connection attempts, including the first. Zero is treated as one.
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// A single attempt, no retry.
    pub const fn once() -> Self {
        Self {
            attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Create a connection pool and open its first connection.
pub async fn create_pool(
    options: PgConnectOptions,
    settings: PoolSettings,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await
}

/// Create a connection pool, retrying with a fixed delay until the policy's
/// attempts are exhausted. The error from the last attempt is returned.
pub async fn connect_with_retry(
    options: &PgConnectOptions,
    settings: PoolSettings,
    policy: RetryPolicy,
) -> Result<DbPool, sqlx::Error> {
    let max_attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match create_pool(options.clone(), settings).await {
            Ok(pool) => {
                if attempt > 1 {
                    tracing::info!(attempt, "Database connection established after retry");
                }
                return Ok(pool);
            }
            Err(err) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %err,
                    "Database connection failed, retrying",
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!(attempt, error = %err, "Database connection attempts exhausted");
                return Err(err);
            }
        }
    }
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

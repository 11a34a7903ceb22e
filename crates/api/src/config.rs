use std::time::Duration;

use axum::http::HeaderValue;
use libris_db::{PoolSettings, RetryPolicy};
use sqlx::postgres::PgConnectOptions;

/// Which of the two services this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Catalog,
    Users,
}

impl Service {
    /// Name reported by `/health` and used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Service::Catalog => "catalog-service",
            Service::Users => "user-service",
        }
    }

    const fn defaults(self) -> ServiceDefaults {
        match self {
            Service::Catalog => ServiceDefaults {
                port: 5000,
                db_host: "catalog-db",
                db_name: "catalog_db",
                db_user: "catalog_user",
                db_pass: "catalog_pass",
                connect_attempts: 1,
            },
            Service::Users => ServiceDefaults {
                port: 5001,
                db_host: "user-db",
                db_name: "user_db",
                db_user: "user_user",
                db_pass: "user_pass",
                connect_attempts: 5,
            },
        }
    }
}

struct ServiceDefaults {
    port: u16,
    db_host: &'static str,
    db_name: &'static str,
    db_user: &'static str,
    db_pass: &'static str,
    connect_attempts: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidNumber {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("Invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
}

/// Origins allowed to make cross-origin requests.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connect_options: PgConnectOptions,
    pub pool: PoolSettings,
    /// Applied only to the initial connection at startup.
    pub retry: RetryPolicy,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults matching the service's docker-compose setup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub service: Service,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000` catalog, `5001` users).
    pub port: u16,
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                       | Default                              |
    /// |-------------------------------|--------------------------------------|
    /// | `HOST`                        | `0.0.0.0`                            |
    /// | `PORT`                        | `5000` / `5001`                      |
    /// | `CORS_ORIGINS`                | `*`                                  |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                                 |
    /// | `DATABASE_URL`                | unset; overrides the `DB_*` vars     |
    /// | `DB_HOST`                     | `catalog-db` / `user-db`             |
    /// | `DB_PORT`                     | `5432`                               |
    /// | `DB_NAME`                     | `catalog_db` / `user_db`             |
    /// | `DB_USER`                     | `catalog_user` / `user_user`         |
    /// | `DB_PASS`                     | `catalog_pass` / `user_pass`         |
    /// | `DB_MAX_CONNECTIONS`          | `10`                                 |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`     | `30`                                 |
    /// | `DB_CONNECT_ATTEMPTS`         | `1` / `5`                            |
    /// | `DB_CONNECT_RETRY_DELAY_SECS` | `5`                                  |
    pub fn from_env(service: Service) -> Result<Self, ConfigError> {
        Self::from_lookup(service, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(service: Service, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = service.defaults();
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_number(&lookup, "PORT", defaults.port, "u16")?;
        let cors_origins = parse_cors_origins(&var("CORS_ORIGINS", "*"))?;
        let request_timeout_secs = parse_number(&lookup, "REQUEST_TIMEOUT_SECS", 30, "u64")?;

        let connect_options = match lookup("DATABASE_URL") {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(ConfigError::InvalidDatabaseUrl)?,
            None => PgConnectOptions::new()
                .host(&var("DB_HOST", defaults.db_host))
                .port(parse_number(&lookup, "DB_PORT", 5432, "u16")?)
                .database(&var("DB_NAME", defaults.db_name))
                .username(&var("DB_USER", defaults.db_user))
                .password(&var("DB_PASS", defaults.db_pass)),
        };

        let pool = PoolSettings {
            max_connections: parse_number(&lookup, "DB_MAX_CONNECTIONS", 10, "u32")?,
            acquire_timeout: Duration::from_secs(parse_number(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                30,
                "u64",
            )?),
        };

        let retry = RetryPolicy {
            attempts: parse_number(
                &lookup,
                "DB_CONNECT_ATTEMPTS",
                defaults.connect_attempts,
                "u32",
            )?,
            delay: Duration::from_secs(parse_number(
                &lookup,
                "DB_CONNECT_RETRY_DELAY_SECS",
                5,
                "u64",
            )?),
        };

        Ok(Self {
            service,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database: DatabaseConfig {
                connect_options,
                pool,
                retry,
            },
        })
    }
}

fn parse_number<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var,
            expected,
            value,
        }),
    }
}

/// Parse a comma-separated origin list. `*` anywhere in the list allows any
/// origin.
fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if entries.is_empty() || entries.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    entries
        .into_iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

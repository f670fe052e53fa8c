//! PostgreSQL pool for the account and refresh token tables.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

use pwdless_core::config::DatabaseConfig;
use pwdless_core::error::{AppError, ErrorKind};
use pwdless_core::result::AppResult;

/// Reported to the server as `application_name`.
const APPLICATION_NAME: &str = "pwdless-server";

/// Tables the session flow reads and writes.
const REQUIRED_TABLES: [&str; 2] = ["accounts", "tokens"];

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connects using the `[database]` settings.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let masked = mask_password(&config.url);
        info!(
            url = %masked,
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid database url {masked}"),
                    e,
                )
            })?
            .application_name(APPLICATION_NAME);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to {masked}"),
                    e,
                )
            })?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Whether the database answers and holds the account and token tables.
    ///
    /// `Ok(false)` means reachable but not migrated.
    pub async fn schema_ready(&self) -> AppResult<bool> {
        let tables: Vec<String> = REQUIRED_TABLES.iter().map(|t| t.to_string()).collect();
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = ANY($1)",
        )
        .bind(&tables)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Readiness query failed", e))?;

        let ready = found == REQUIRED_TABLES.len() as i64;
        if !ready {
            warn!(found, expected = REQUIRED_TABLES.len(), "Session tables missing");
        }
        Ok(ready)
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Replaces the password in a database URL with `****`.
fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    let Some(at) = url[scheme_end..].rfind('@').map(|p| p + scheme_end) else {
        return url.to_string();
    };
    match url[scheme_end..at].find(':') {
        Some(colon) => {
            let colon = colon + scheme_end;
            format!("{}:****{}", &url[..colon], &url[at..])
        }
        None => url.to_string(),
    }
}

//! Embedded schema migrations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use pwdless_core::error::{AppError, ErrorKind};
use pwdless_core::result::AppResult;

/// Migrations compiled in from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Highest schema version this build knows about.
pub fn latest_version() -> i64 {
    MIGRATOR.iter().map(|m| m.version).max().unwrap_or_default()
}

/// Brings the schema up to [`latest_version`].
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let target = latest_version();
    info!(target, "Applying schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to migrate schema to version {target}"),
            e,
        )
    })?;

    info!(version = target, "Schema up to date");
    Ok(())
}

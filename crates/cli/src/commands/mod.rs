//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the database-facing commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Neither `SUNDRY_DATABASE_URL` nor `DATABASE_URL` is set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect to the configured database.
///
/// Reads `SUNDRY_DATABASE_URL` (falling back to `DATABASE_URL`), loading a
/// `.env` file first if present.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SUNDRY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("SUNDRY_DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;
    Ok(pool)
}

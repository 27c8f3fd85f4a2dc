//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sundry-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SUNDRY_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migration files live in `crates/api/migrations/`:
//! ```text
//! migrations/
//! ├── 20260801000001_create_users.sql
//! ├── 20260801000002_create_products.sql
//! ├── 20260801000003_create_cart_items.sql
//! └── 20260801000004_create_orders.sql
//! ```

use super::CommandError;

/// Run database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    tracing::info!("Connecting to database...");
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

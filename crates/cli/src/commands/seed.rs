//! Database seeding command.
//!
//! Inserts a small sample catalogue for local development. Existing rows are
//! left alone; running the command twice adds nothing new.

use super::CommandError;

/// Sample catalogue: (name, price, stock, note).
const SAMPLE_PRODUCTS: &[(&str, i32, i32, Option<&str>)] = &[
    ("green tea", 120, 50, Some("loose leaf, 100g")),
    ("oolong tea", 150, 40, None),
    ("black tea", 110, 60, None),
    ("tea pot", 450, 12, Some("ceramic, 600ml")),
    ("tea cup", 90, 80, None),
];

/// Seed the database with a sample catalogue.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    tracing::info!("Connecting to database...");
    let pool = super::connect().await?;

    tracing::info!("Seeding sample catalogue...");
    for &(name, price, stock, note) in SAMPLE_PRODUCTS {
        sqlx::query(
            r"
            INSERT INTO products (product_name, price, stock, note)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE product_name = $1)
            ",
        )
        .bind(name)
        .bind(price)
        .bind(stock)
        .bind(note)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeding complete!");
    Ok(())
}

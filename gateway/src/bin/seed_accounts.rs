use std::env;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

/// Demo accounts ensured at startup so a fresh environment can exercise
/// `/transfer` immediately. Amounts are minor units (paise).
const DEMO_ACCOUNTS: &[(&str, &str, i64)] = &[
    ("00000000-0000-0000-0000-0000000000a1", "Alice", 1_000_00),
    ("00000000-0000-0000-0000-0000000000b1", "Bob", 500_00),
    ("00000000-0000-0000-0000-0000000000c1", "Charlie", 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let postgres_host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "postgres".to_string());
    let postgres_port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let postgres_db = env::var("POSTGRES_DB").unwrap_or_else(|_| "easpayments".to_string());
    let postgres_user = env::var("POSTGRES_USER").unwrap_or_else(|_| "easuser".to_string());
    let postgres_password = env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "easpass".to_string());
    let database_url = format!(
        "postgres://{postgres_user}:{postgres_password}@{postgres_host}:{postgres_port}/{postgres_db}"
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .map_err(|e| format!("Failed to connect: {e}"))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| format!("Migration failed: {e}"))?;

    for (id, name, start_balance) in DEMO_ACCOUNTS {
        let id: Uuid = id.parse()?;
        sqlx::query(
            "INSERT INTO accounts (id, name, currency, start_balance) \
             VALUES ($1, $2, 'INR', $3) ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(name)
        .bind(start_balance)
        .execute(&pool)
        .await?;
    }

    println!("Accounts created / ensured.");
    Ok(())
}

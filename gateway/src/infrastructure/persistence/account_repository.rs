use async_trait::async_trait;
use common::domain::{Account, AccountId};
use sqlx::PgPool;

use crate::domain::error::GatewayError;
use crate::domain::repository::AccountRepository;

/// Read-only view of the ledger-owned `accounts` table.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn exists(&self, id: AccountId) -> Result<bool, GatewayError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn list(&self) -> Result<Vec<Account>, GatewayError> {
        let accounts = sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(accounts)
    }
}

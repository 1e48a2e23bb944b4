use async_trait::async_trait;
use common::domain::{IdempotencyKeyRecord, IdempotencyStatus, TransferOut, TxId};
use sqlx::PgPool;

use crate::domain::error::GatewayError;
use crate::domain::repository::IdempotencyRepository;

pub struct PostgresIdempotencyRepository {
    pool: PgPool,
}

impl PostgresIdempotencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdempotencyRepository for PostgresIdempotencyRepository {
    async fn find(&self, key: &str) -> Result<Option<IdempotencyKeyRecord>, GatewayError> {
        let record = sqlx::query_as::<_, IdempotencyKeyRecord>(
            "SELECT * FROM idempotency_keys WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn insert_in_progress(&self, key: &str) -> Result<(), GatewayError> {
        // A duplicate-key conflict here is a normal outcome: the record
        // already exists from a concurrent or retried admission, and we must
        // not overwrite whatever state it has since progressed to.
        let result = sqlx::query(
            "INSERT INTO idempotency_keys (key, status) VALUES ($1, 'IN_PROGRESS') ON CONFLICT (key) DO NOTHING",
        )
        .bind(key)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn finalize(
        &self,
        key: &str,
        status: IdempotencyStatus,
        tx_id: Option<TxId>,
        response: &TransferOut,
    ) -> Result<(), GatewayError> {
        let response_json = serde_json::to_value(response)
            .map_err(|e| GatewayError::RepositoryError(e.to_string()))?;

        sqlx::query(
            "UPDATE idempotency_keys SET status = $1, tx_id = $2, response = $3 WHERE key = $4",
        )
        .bind(status)
        .bind(tx_id)
        .bind(response_json)
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<IdempotencyKeyRecord>, GatewayError> {
        let records = sqlx::query_as::<_, IdempotencyKeyRecord>(
            "SELECT * FROM idempotency_keys ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}

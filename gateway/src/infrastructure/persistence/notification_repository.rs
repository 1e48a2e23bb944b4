use async_trait::async_trait;
use common::domain::{Direction, Notification};
use sqlx::PgPool;

use crate::domain::error::GatewayError;
use crate::domain::repository::{NewNotification, NotificationRepository};

pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn insert(&self, notification: NewNotification) -> Result<(), GatewayError> {
        let direction = match notification.direction.as_str() {
            "DEBIT" => Direction::Debit,
            "CREDIT" => Direction::Credit,
            other => {
                return Err(GatewayError::RepositoryError(format!(
                    "unknown notification direction: {other}"
                )))
            }
        };

        sqlx::query(
            "INSERT INTO notifications (account_id, tx_id, direction, amount, currency, message) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(notification.account_id)
        .bind(notification.tx_id)
        .bind(direction)
        .bind(notification.amount)
        .bind(notification.currency)
        .bind(notification.message)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Notification>, GatewayError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }
}

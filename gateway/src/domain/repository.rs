use async_trait::async_trait;
use common::domain::{Account, AccountId, IdempotencyKeyRecord, IdempotencyStatus, Notification, TransferOut};

use crate::domain::error::GatewayError;

/// Read-only access to the `accounts` table. The gateway does not own this
/// table (the ledger is the authority on currency/start_balance) but still
/// reads it directly for the pre-flight existence check and the account
/// listing endpoint, mirroring the original's `db.account_exists`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn exists(&self, id: AccountId) -> Result<bool, GatewayError>;
    async fn list(&self) -> Result<Vec<Account>, GatewayError>;
}

/// Port for the gateway-owned `idempotency_keys` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdempotencyRepository: Send + Sync {
    async fn find(&self, key: &str) -> Result<Option<IdempotencyKeyRecord>, GatewayError>;

    /// Inserts an `IN_PROGRESS` row. A duplicate-key conflict is swallowed:
    /// the admission step must tolerate a pre-existing row.
    async fn insert_in_progress(&self, key: &str) -> Result<(), GatewayError>;

    async fn finalize(
        &self,
        key: &str,
        status: IdempotencyStatus,
        tx_id: Option<common::domain::TxId>,
        response: &TransferOut,
    ) -> Result<(), GatewayError>;

    async fn list(&self) -> Result<Vec<IdempotencyKeyRecord>, GatewayError>;
}

/// Port for the gateway-owned `notifications` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: NewNotification) -> Result<(), GatewayError>;
    async fn list(&self) -> Result<Vec<Notification>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub account_id: AccountId,
    pub tx_id: common::domain::TxId,
    pub direction: String,
    pub amount: i64,
    pub currency: String,
    pub message: String,
}

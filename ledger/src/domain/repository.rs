use async_trait::async_trait;
use common::domain::{Account, AccountId, LedgerEntryPair, TxId};

use crate::domain::error::LedgerError;

/// Outcome of the one database transaction that records a transfer. `Failed`
/// covers every domain-level rejection (account missing, currency mismatch,
/// insufficient funds); only an infrastructure fault surfaces as `Err`.
#[derive(Debug, Clone)]
pub enum TransferAttempt {
    Success {
        tx_id: TxId,
        currency: String,
        from_balance_after: i64,
        to_balance_after: i64,
    },
    Failed(String),
}

/// Port for the ledger's persistence. The concrete Postgres implementation
/// owns the transaction boundary, the `REPEATABLE READ` isolation level, and
/// the `SELECT ... FOR UPDATE` gate on the source account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, LedgerError>;

    async fn balance(&self, id: AccountId) -> Result<i64, LedgerError>;

    async fn record_transfer(
        &self,
        from_account: AccountId,
        to_account: AccountId,
        amount: i64,
    ) -> Result<TransferAttempt, LedgerError>;

    async fn get_all_entries(&self) -> Result<Vec<LedgerEntryPair>, LedgerError>;
}

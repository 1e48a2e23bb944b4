use async_trait::async_trait;
use common::domain::{AccountId, LedgerEntryPair};

use crate::domain::error::GatewayError;

/// Outcome of one `LedgerService.Transfer` RPC call. Mirrors
/// `ledger::domain::entities::TransferOutcome` but lives on the gateway
/// side of the wire, decoded from `TransferResponse`.
#[derive(Debug, Clone)]
pub struct LedgerTransferOutcome {
    pub tx_id: Option<common::domain::TxId>,
    pub from_balance_after: i64,
    pub to_balance_after: i64,
    pub currency: String,
    pub status: common::domain::TransferStatus,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LedgerBalance {
    pub balance: i64,
    pub currency: String,
}

/// Port for the gateway's outbound calls to the ledger service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn transfer(
        &self,
        from_account: AccountId,
        to_account: AccountId,
        amount: i64,
        currency: String,
        idempotency_key: String,
    ) -> Result<LedgerTransferOutcome, GatewayError>;

    async fn get_balance(&self, account_id: AccountId) -> Result<LedgerBalance, GatewayError>;

    async fn get_all_entries(&self) -> Result<Vec<LedgerEntryPair>, GatewayError>;
}

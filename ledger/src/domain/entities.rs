use common::domain::{AccountId, TransferStatus, TxId};

/// Result of `TransferUseCase::execute`. Always `Ok` unless the repository
/// itself failed (connection loss, etc.) — a rejected transfer (bad
/// currency, insufficient funds, non-positive amount) is represented as
/// `status = Failed` with a `message`.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub tx_id: Option<TxId>,
    pub from_account: AccountId,
    pub to_account: AccountId,
    pub amount: i64,
    pub currency: String,
    pub from_balance_after: i64,
    pub to_balance_after: i64,
    pub status: TransferStatus,
    pub message: Option<String>,
}

impl TransferOutcome {
    pub fn failed(from_account: AccountId, to_account: AccountId, amount: i64, currency: String, message: impl Into<String>) -> Self {
        Self {
            tx_id: None,
            from_account,
            to_account,
            amount,
            currency,
            from_balance_after: 0,
            to_balance_after: 0,
            status: TransferStatus::Failed,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BalanceOutcome {
    pub account_id: AccountId,
    pub balance: i64,
    pub currency: String,
}

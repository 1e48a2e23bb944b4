use std::sync::Arc;

use common::domain::{AccountId, TransferStatus};

use crate::domain::entities::TransferOutcome;
use crate::domain::error::LedgerError;
use crate::domain::repository::{LedgerRepository, TransferAttempt};

/// Orchestrates a single money movement between two accounts.
///
/// Every domain-level rejection (missing account, currency mismatch,
/// insufficient funds, non-positive amount) comes back as `Ok` with
/// `status = Failed`; `Err` is reserved for the repository itself failing.
#[derive(Clone)]
pub struct TransferUseCase {
    ledger_repo: Arc<dyn LedgerRepository>,
}

impl TransferUseCase {
    pub fn new(ledger_repo: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger_repo }
    }

    #[tracing::instrument(name = "TransferUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        from_account: AccountId,
        to_account: AccountId,
        amount: i64,
        currency: String,
    ) -> Result<TransferOutcome, LedgerError> {
        if amount <= 0 {
            return Ok(TransferOutcome::failed(
                from_account,
                to_account,
                amount,
                currency,
                "Amount must be > 0",
            ));
        }

        if from_account == to_account {
            return Ok(TransferOutcome::failed(
                from_account,
                to_account,
                amount,
                currency,
                "Cannot transfer to the same account",
            ));
        }

        match self
            .ledger_repo
            .record_transfer(from_account, to_account, amount)
            .await?
        {
            TransferAttempt::Success {
                tx_id,
                currency,
                from_balance_after,
                to_balance_after,
            } => Ok(TransferOutcome {
                tx_id: Some(tx_id),
                from_account,
                to_account,
                amount,
                currency,
                from_balance_after,
                to_balance_after,
                status: TransferStatus::Success,
                message: None,
            }),
            TransferAttempt::Failed(message) => Ok(TransferOutcome::failed(
                from_account,
                to_account,
                amount,
                currency,
                message,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockLedgerRepository;
    use common::domain::TxId;

    #[tokio::test]
    async fn test_transfer_success() {
        let mut mock_repo = MockLedgerRepository::new();
        let from = AccountId::new();
        let to = AccountId::new();
        let tx_id = TxId::new();

        mock_repo
            .expect_record_transfer()
            .withf(move |f, t, amt| *f == from && *t == to && *amt == 500)
            .times(1)
            .returning(move |_, _, _| {
                Ok(TransferAttempt::Success {
                    tx_id,
                    currency: "USD".to_string(),
                    from_balance_after: 500,
                    to_balance_after: 1500,
                })
            });

        let use_case = TransferUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute(from, to, 500, "USD".to_string())
            .await
            .unwrap();

        assert_eq!(result.status, TransferStatus::Success);
        assert_eq!(result.tx_id, Some(tx_id));
        assert_eq!(result.from_balance_after, 500);
        assert_eq!(result.to_balance_after, 1500);
        assert!(result.message.is_none());
    }

    #[tokio::test]
    async fn test_transfer_insufficient_funds_is_not_an_error() {
        let mut mock_repo = MockLedgerRepository::new();
        let from = AccountId::new();
        let to = AccountId::new();

        mock_repo
            .expect_record_transfer()
            .times(1)
            .returning(|_, _, _| Ok(TransferAttempt::Failed("Insufficient funds".to_string())));

        let use_case = TransferUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute(from, to, 500, "USD".to_string())
            .await
            .unwrap();

        assert_eq!(result.status, TransferStatus::Failed);
        assert_eq!(result.message.as_deref(), Some("Insufficient funds"));
    }

    #[tokio::test]
    async fn test_transfer_rejects_non_positive_amount_without_hitting_repository() {
        let mock_repo = MockLedgerRepository::new();
        let from = AccountId::new();
        let to = AccountId::new();

        let use_case = TransferUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute(from, to, 0, "USD".to_string())
            .await
            .unwrap();

        assert_eq!(result.status, TransferStatus::Failed);
    }

    #[tokio::test]
    async fn test_transfer_rejects_self_transfer() {
        let mock_repo = MockLedgerRepository::new();
        let account = AccountId::new();

        let use_case = TransferUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute(account, account, 100, "USD".to_string())
            .await
            .unwrap();

        assert_eq!(result.status, TransferStatus::Failed);
    }

    #[tokio::test]
    async fn test_transfer_repository_error_propagates() {
        let mut mock_repo = MockLedgerRepository::new();
        let from = AccountId::new();
        let to = AccountId::new();

        mock_repo
            .expect_record_transfer()
            .times(1)
            .returning(|_, _, _| Err(LedgerError::RepositoryError("connection lost".to_string())));

        let use_case = TransferUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute(from, to, 500, "USD".to_string()).await;

        assert!(result.is_err());
    }
}

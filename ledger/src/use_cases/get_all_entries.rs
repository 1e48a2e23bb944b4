use std::sync::Arc;

use common::domain::LedgerEntryPair;

use crate::domain::error::LedgerError;
use crate::domain::repository::LedgerRepository;

/// Lists every settled transfer as a debit/credit leg pair, for the
/// ledger audit views. Grounded in the original `get_all_entries` query.
#[derive(Clone)]
pub struct GetAllEntriesUseCase {
    ledger_repo: Arc<dyn LedgerRepository>,
}

impl GetAllEntriesUseCase {
    pub fn new(ledger_repo: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger_repo }
    }

    #[tracing::instrument(name = "GetAllEntriesUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<LedgerEntryPair>, LedgerError> {
        self.ledger_repo.get_all_entries().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockLedgerRepository;
    use common::domain::{AccountId, TxId};
    use chrono::Utc;

    #[tokio::test]
    async fn test_get_all_entries_returns_pairs() {
        let mut mock_repo = MockLedgerRepository::new();
        let pair = LedgerEntryPair {
            tx_id: TxId::new(),
            from_account: AccountId::new(),
            to_account: AccountId::new(),
            amount: 250,
            currency: "USD".to_string(),
            created_at: Utc::now(),
        };
        let expected = pair.clone();

        mock_repo
            .expect_get_all_entries()
            .times(1)
            .returning(move || Ok(vec![pair.clone()]));

        let use_case = GetAllEntriesUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].amount, expected.amount);
    }

    #[tokio::test]
    async fn test_get_all_entries_repository_error() {
        let mut mock_repo = MockLedgerRepository::new();

        mock_repo
            .expect_get_all_entries()
            .times(1)
            .returning(|| Err(LedgerError::RepositoryError("down".to_string())));

        let use_case = GetAllEntriesUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute().await;

        assert!(result.is_err());
    }
}

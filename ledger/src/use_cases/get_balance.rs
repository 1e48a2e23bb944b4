use std::sync::Arc;

use common::domain::AccountId;

use crate::domain::entities::BalanceOutcome;
use crate::domain::error::LedgerError;
use crate::domain::repository::LedgerRepository;

/// Reads the current balance of an account: start balance plus credits
/// minus debits over `ledger_entries`. An unknown account defaults its
/// currency to `INR` rather than surfacing a not-found error.
#[derive(Clone)]
pub struct GetBalanceUseCase {
    ledger_repo: Arc<dyn LedgerRepository>,
}

impl GetBalanceUseCase {
    pub fn new(ledger_repo: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger_repo }
    }

    #[tracing::instrument(name = "GetBalanceUseCase::execute", skip(self))]
    pub async fn execute(&self, account_id: AccountId) -> Result<BalanceOutcome, LedgerError> {
        let account = self.ledger_repo.get_account(account_id).await?;
        let balance = self.ledger_repo.balance(account_id).await?;

        Ok(BalanceOutcome {
            account_id,
            balance,
            currency: account.map(|a| a.currency).unwrap_or_else(|| "INR".to_string()),
        })
    }
}

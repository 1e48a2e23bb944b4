use std::str::FromStr;
use std::sync::Arc;

use common::domain::AccountId;

use crate::domain::error::GatewayError;
use crate::domain::ledger_client::{LedgerBalance, LedgerClient};

pub struct GetBalanceUseCase {
    ledger_client: Arc<dyn LedgerClient>,
}

impl GetBalanceUseCase {
    pub fn new(ledger_client: Arc<dyn LedgerClient>) -> Self {
        Self { ledger_client }
    }

    pub async fn execute(&self, account_id: &str) -> Result<LedgerBalance, GatewayError> {
        let account_id = AccountId::from_str(account_id)
            .map_err(|_| GatewayError::InvalidInput("malformed account_id".to_string()))?;
        self.ledger_client.get_balance(account_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger_client::MockLedgerClient;

    #[tokio::test]
    async fn test_get_balance_delegates_to_ledger_client() {
        let account_id = AccountId::new();
        let mut client = MockLedgerClient::new();
        client
            .expect_get_balance()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(|_| {
                Ok(LedgerBalance {
                    balance: 500,
                    currency: "INR".to_string(),
                })
            });

        let use_case = GetBalanceUseCase::new(Arc::new(client));
        let result = use_case.execute(&account_id.to_string()).await.unwrap();

        assert_eq!(result.balance, 500);
    }

    #[tokio::test]
    async fn test_get_balance_rejects_malformed_account_id() {
        let use_case = GetBalanceUseCase::new(Arc::new(MockLedgerClient::new()));
        let result = use_case.execute("not-a-uuid").await;

        assert!(matches!(result, Err(GatewayError::InvalidInput(_))));
    }
}

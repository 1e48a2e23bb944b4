use std::sync::Arc;

use common::domain::Account;

use crate::domain::error::GatewayError;
use crate::domain::repository::AccountRepository;

pub struct ListAccountsUseCase {
    account_repo: Arc<dyn AccountRepository>,
}

impl ListAccountsUseCase {
    pub fn new(account_repo: Arc<dyn AccountRepository>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self) -> Result<Vec<Account>, GatewayError> {
        self.account_repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockAccountRepository;
    use common::domain::AccountId;

    #[tokio::test]
    async fn test_list_accounts_delegates_to_repository() {
        let mut repo = MockAccountRepository::new();
        repo.expect_list().times(1).returning(|| {
            Ok(vec![Account {
                id: AccountId::new(),
                name: "alice".to_string(),
                currency: "INR".to_string(),
                start_balance: 1000,
                created_at: chrono::Utc::now(),
            }])
        });

        let use_case = ListAccountsUseCase::new(Arc::new(repo));
        let accounts = use_case.execute().await.unwrap();

        assert_eq!(accounts.len(), 1);
    }
}

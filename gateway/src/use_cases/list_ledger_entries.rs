use std::sync::Arc;

use common::domain::LedgerEntryPair;

use crate::domain::error::GatewayError;
use crate::domain::ledger_client::LedgerClient;

pub struct ListLedgerEntriesUseCase {
    ledger_client: Arc<dyn LedgerClient>,
}

impl ListLedgerEntriesUseCase {
    pub fn new(ledger_client: Arc<dyn LedgerClient>) -> Self {
        Self { ledger_client }
    }

    pub async fn execute(&self) -> Result<Vec<LedgerEntryPair>, GatewayError> {
        self.ledger_client.get_all_entries().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger_client::MockLedgerClient;

    #[tokio::test]
    async fn test_list_ledger_entries_delegates_to_ledger_client() {
        let mut client = MockLedgerClient::new();
        client.expect_get_all_entries().times(1).returning(|| Ok(vec![]));

        let use_case = ListLedgerEntriesUseCase::new(Arc::new(client));
        let entries = use_case.execute().await.unwrap();

        assert!(entries.is_empty());
    }
}

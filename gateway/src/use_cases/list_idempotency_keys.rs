use std::sync::Arc;

use common::domain::IdempotencyKeyRecord;

use crate::domain::error::GatewayError;
use crate::domain::repository::IdempotencyRepository;

pub struct ListIdempotencyKeysUseCase {
    idempotency_repo: Arc<dyn IdempotencyRepository>,
}

impl ListIdempotencyKeysUseCase {
    pub fn new(idempotency_repo: Arc<dyn IdempotencyRepository>) -> Self {
        Self { idempotency_repo }
    }

    pub async fn execute(&self) -> Result<Vec<IdempotencyKeyRecord>, GatewayError> {
        self.idempotency_repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockIdempotencyRepository;

    #[tokio::test]
    async fn test_list_idempotency_keys_delegates_to_repository() {
        let mut repo = MockIdempotencyRepository::new();
        repo.expect_list().times(1).returning(|| Ok(vec![]));

        let use_case = ListIdempotencyKeysUseCase::new(Arc::new(repo));
        let records = use_case.execute().await.unwrap();

        assert!(records.is_empty());
    }
}

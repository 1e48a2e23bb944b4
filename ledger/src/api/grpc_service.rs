use std::str::FromStr;

use common::domain::AccountId;
use common::proto::ledger_service_server::LedgerService;
use common::proto::{
    BalanceRequest, BalanceResponse, GetAllEntriesRequest, GetAllEntriesResponse,
    LedgerEntryPair as ProtoLedgerEntryPair, TransferRequest, TransferResponse,
};
use tonic::{Request, Response, Status};

use crate::use_cases::{GetAllEntriesUseCase, GetBalanceUseCase, TransferUseCase};

/// gRPC surface the gateway calls into for every ledger operation.
pub struct LedgerGrpcService {
    transfer_use_case: TransferUseCase,
    get_balance_use_case: GetBalanceUseCase,
    get_all_entries_use_case: GetAllEntriesUseCase,
}

impl LedgerGrpcService {
    pub fn new(
        transfer_use_case: TransferUseCase,
        get_balance_use_case: GetBalanceUseCase,
        get_all_entries_use_case: GetAllEntriesUseCase,
    ) -> Self {
        Self {
            transfer_use_case,
            get_balance_use_case,
            get_all_entries_use_case,
        }
    }
}

fn parse_account_id(raw: &str) -> Result<AccountId, Status> {
    AccountId::from_str(raw).map_err(|_| Status::invalid_argument(format!("invalid account id: {raw}")))
}

#[tonic::async_trait]
impl LedgerService for LedgerGrpcService {
    async fn transfer(
        &self,
        request: Request<TransferRequest>,
    ) -> Result<Response<TransferResponse>, Status> {
        let req = request.into_inner();
        let from_account = parse_account_id(&req.from_account)?;
        let to_account = parse_account_id(&req.to_account)?;

        let outcome = self
            .transfer_use_case
            .execute(from_account, to_account, req.amount, req.currency)
            .await?;

        Ok(Response::new(TransferResponse {
            tx_id: outcome.tx_id.map(|id| id.to_string()).unwrap_or_default(),
            from_account: outcome.from_account.to_string(),
            to_account: outcome.to_account.to_string(),
            amount: outcome.amount,
            currency: outcome.currency,
            from_balance_after: outcome.from_balance_after,
            to_balance_after: outcome.to_balance_after,
            status: outcome.status.as_str().to_string(),
            message: outcome.message.unwrap_or_default(),
        }))
    }

    async fn get_balance(
        &self,
        request: Request<BalanceRequest>,
    ) -> Result<Response<BalanceResponse>, Status> {
        let req = request.into_inner();
        let account_id = parse_account_id(&req.account_id)?;

        let outcome = self.get_balance_use_case.execute(account_id).await?;

        Ok(Response::new(BalanceResponse {
            account_id: outcome.account_id.to_string(),
            balance: outcome.balance,
            currency: outcome.currency,
        }))
    }

    async fn get_all_entries(
        &self,
        _request: Request<GetAllEntriesRequest>,
    ) -> Result<Response<GetAllEntriesResponse>, Status> {
        let entries = self.get_all_entries_use_case.execute().await?;

        Ok(Response::new(GetAllEntriesResponse {
            entries: entries
                .into_iter()
                .map(|pair| ProtoLedgerEntryPair {
                    tx_id: pair.tx_id.to_string(),
                    from_account: pair.from_account.to_string(),
                    to_account: pair.to_account.to_string(),
                    amount: pair.amount,
                    currency: pair.currency,
                    created_at: pair.created_at.to_rfc3339(),
                })
                .collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::LedgerError;
    use crate::domain::repository::MockLedgerRepository;
    use common::domain::TxId;
    use std::sync::Arc;

    fn build_service(mock: MockLedgerRepository) -> LedgerGrpcService {
        let repo = Arc::new(mock);
        LedgerGrpcService::new(
            TransferUseCase::new(repo.clone()),
            GetBalanceUseCase::new(repo.clone()),
            GetAllEntriesUseCase::new(repo),
        )
    }

    #[tokio::test]
    async fn test_transfer_rpc_success() {
        let mut mock_repo = MockLedgerRepository::new();
        let tx_id = TxId::new();
        mock_repo.expect_record_transfer().times(1).returning(move |_, _, _| {
            Ok(crate::domain::repository::TransferAttempt::Success {
                tx_id,
                currency: "USD".to_string(),
                from_balance_after: 400,
                to_balance_after: 600,
            })
        });

        let service = build_service(mock_repo);
        let from = AccountId::new();
        let to = AccountId::new();

        let response = service
            .transfer(Request::new(TransferRequest {
                from_account: from.to_string(),
                to_account: to.to_string(),
                amount: 100,
                currency: "USD".to_string(),
                idempotency_key: "key-1".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.status, "SUCCESS");
        assert_eq!(response.tx_id, tx_id.to_string());
    }

    #[tokio::test]
    async fn test_transfer_rpc_rejects_malformed_account_id() {
        let mock_repo = MockLedgerRepository::new();
        let service = build_service(mock_repo);

        let result = service
            .transfer(Request::new(TransferRequest {
                from_account: "not-a-uuid".to_string(),
                to_account: AccountId::new().to_string(),
                amount: 100,
                currency: "USD".to_string(),
                idempotency_key: String::new(),
            }))
            .await;

        assert_eq!(result.unwrap_err().code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_transfer_rpc_maps_repository_error_to_internal_status() {
        let mut mock_repo = MockLedgerRepository::new();
        mock_repo
            .expect_record_transfer()
            .times(1)
            .returning(|_, _, _| Err(LedgerError::RepositoryError("down".to_string())));

        let service = build_service(mock_repo);

        let result = service
            .transfer(Request::new(TransferRequest {
                from_account: AccountId::new().to_string(),
                to_account: AccountId::new().to_string(),
                amount: 100,
                currency: "USD".to_string(),
                idempotency_key: String::new(),
            }))
            .await;

        assert_eq!(result.unwrap_err().code(), tonic::Code::Internal);
    }
}

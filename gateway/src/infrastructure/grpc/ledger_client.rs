use std::time::Duration;

use async_trait::async_trait;
use common::domain::{AccountId, LedgerEntryPair, TransferStatus, TxId};
use common::proto::ledger_service_client::LedgerServiceClient;
use common::proto::{BalanceRequest, GetAllEntriesRequest, TransferRequest};
use tonic::transport::Channel;

use crate::domain::error::GatewayError;
use crate::domain::ledger_client::{LedgerBalance, LedgerClient, LedgerTransferOutcome};

/// gRPC client for `LedgerService`, wrapping a 30s deadline around every call.
pub struct GrpcLedgerClient {
    client: LedgerServiceClient<Channel>,
}

impl GrpcLedgerClient {
    pub async fn connect(target: String) -> Result<Self, GatewayError> {
        let client = LedgerServiceClient::connect(target)
            .await
            .map_err(|e| GatewayError::LedgerRpcError(format!("failed to connect: {e}")))?;
        Ok(Self { client })
    }
}

const RPC_DEADLINE: Duration = Duration::from_secs(30);

#[async_trait]
impl LedgerClient for GrpcLedgerClient {
    async fn transfer(
        &self,
        from_account: AccountId,
        to_account: AccountId,
        amount: i64,
        currency: String,
        idempotency_key: String,
    ) -> Result<LedgerTransferOutcome, GatewayError> {
        let mut client = self.client.clone();

        let request = tonic::Request::new(TransferRequest {
            from_account: from_account.to_string(),
            to_account: to_account.to_string(),
            amount,
            currency,
            idempotency_key,
        });

        let response = tokio::time::timeout(RPC_DEADLINE, client.transfer(request))
            .await
            .map_err(|_| GatewayError::LedgerRpcError("ledger transfer timed out".to_string()))??
            .into_inner();

        let status = if response.status == "SUCCESS" {
            TransferStatus::Success
        } else {
            TransferStatus::Failed
        };

        let tx_id = if response.tx_id.is_empty() {
            None
        } else {
            response.tx_id.parse::<TxId>().ok()
        };

        Ok(LedgerTransferOutcome {
            tx_id,
            from_balance_after: response.from_balance_after,
            to_balance_after: response.to_balance_after,
            currency: response.currency,
            status,
            message: if response.message.is_empty() {
                None
            } else {
                Some(response.message)
            },
        })
    }

    async fn get_balance(&self, account_id: AccountId) -> Result<LedgerBalance, GatewayError> {
        let mut client = self.client.clone();

        let request = tonic::Request::new(BalanceRequest {
            account_id: account_id.to_string(),
        });

        let response = client.get_balance(request).await?.into_inner();

        Ok(LedgerBalance {
            balance: response.balance,
            currency: response.currency,
        })
    }

    async fn get_all_entries(&self) -> Result<Vec<LedgerEntryPair>, GatewayError> {
        let mut client = self.client.clone();

        let response = client
            .get_all_entries(tonic::Request::new(GetAllEntriesRequest {}))
            .await?
            .into_inner();

        Ok(response
            .entries
            .into_iter()
            .filter_map(|entry| {
                Some(LedgerEntryPair {
                    tx_id: entry.tx_id.parse().ok()?,
                    from_account: entry.from_account.parse().ok()?,
                    to_account: entry.to_account.parse().ok()?,
                    amount: entry.amount,
                    currency: entry.currency,
                    created_at: entry.created_at.parse().ok()?,
                })
            })
            .collect())
    }
}

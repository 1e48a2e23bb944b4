use async_trait::async_trait;
use common::domain::{AccountId, TxId};
use common::proto::notification_service_client::NotificationServiceClient;
use common::proto::NotificationRequest;
use tonic::transport::Channel;

use crate::domain::error::GatewayError;
use crate::domain::notify_client::NotifyClient;

pub struct GrpcNotifyClient {
    client: NotificationServiceClient<Channel>,
}

impl GrpcNotifyClient {
    pub async fn connect(target: String) -> Result<Self, GatewayError> {
        let client = NotificationServiceClient::connect(target)
            .await
            .map_err(|e| GatewayError::LedgerRpcError(format!("failed to connect to notifications: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotifyClient for GrpcNotifyClient {
    async fn notify(
        &self,
        account_id: AccountId,
        tx_id: TxId,
        amount: i64,
        direction: &str,
        currency: &str,
        message: &str,
    ) -> Result<(), GatewayError> {
        let mut client = self.client.clone();

        client
            .notify(tonic::Request::new(NotificationRequest {
                account_id: account_id.to_string(),
                tx_id: tx_id.to_string(),
                amount,
                direction: direction.to_string(),
                currency: currency.to_string(),
                message: message.to_string(),
            }))
            .await?;

        Ok(())
    }
}

use async_trait::async_trait;
use common::domain::{AccountId, TxId};

use crate::domain::error::GatewayError;

/// Port for the gateway's outbound calls to the notifications service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotifyClient: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn notify(
        &self,
        account_id: AccountId,
        tx_id: TxId,
        amount: i64,
        direction: &str,
        currency: &str,
        message: &str,
    ) -> Result<(), GatewayError>;
}

use common::proto::notification_service_server::NotificationService;
use common::proto::{NotificationRequest, NotificationResponse};
use tonic::{Request, Response, Status};

/// Notification sink. Logs every incoming leg via `tracing` instead of the
/// original's flat-file append — structured logging already captures what
/// the side-log did, and nothing downstream reads that file back.
#[derive(Debug, Default)]
pub struct NotificationGrpcService;

#[tonic::async_trait]
impl NotificationService for NotificationGrpcService {
    async fn notify(
        &self,
        request: Request<NotificationRequest>,
    ) -> Result<Response<NotificationResponse>, Status> {
        let req = request.into_inner();

        tracing::info!(
            account_id = %req.account_id,
            tx_id = %req.tx_id,
            direction = %req.direction,
            amount = req.amount,
            currency = %req.currency,
            message = %req.message,
            "notification received"
        );

        Ok(Response::new(NotificationResponse { ok: true }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notify_always_acknowledges() {
        let service = NotificationGrpcService;

        let response = service
            .notify(Request::new(NotificationRequest {
                account_id: "acc-1".to_string(),
                tx_id: "tx-1".to_string(),
                amount: 500,
                direction: "DEBIT".to_string(),
                currency: "USD".to_string(),
                message: "Debited 500 USD".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert!(response.ok);
    }
}

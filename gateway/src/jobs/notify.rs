use std::sync::Arc;

use common::domain::{AccountId, TxId};
use tokio::sync::mpsc;

use crate::domain::notify_client::NotifyClient;
use crate::domain::repository::{NewNotification, NotificationRepository};

/// One completed transfer's two notification legs, queued for background delivery.
#[derive(Debug, Clone)]
pub struct NotificationJob {
    pub tx_id: TxId,
    pub from_account: AccountId,
    pub to_account: AccountId,
    pub amount: i64,
    pub currency: String,
}

/// Fan-out worker: a bounded channel feeding a single consumer task,
/// so a burst of transfers can't spawn an unbounded number of concurrent RPCs
/// against the notifications service. `submit` is non-blocking: a full queue
/// drops the job rather than pushing backpressure onto the transfer response
/// path, since notifications are already a best-effort, at-least-once channel.
pub struct NotificationFanout {
    sender: mpsc::Sender<NotificationJob>,
}

impl NotificationFanout {
    pub fn spawn(
        notification_repo: Arc<dyn NotificationRepository>,
        notify_client: Arc<dyn NotifyClient>,
        queue_capacity: usize,
    ) -> Arc<Self> {
        let (sender, mut receiver) = mpsc::channel::<NotificationJob>(queue_capacity);

        tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                deliver_legs(&notification_repo, &notify_client, job).await;
            }
        });

        Arc::new(Self { sender })
    }

    /// Queues a job for background delivery. Returns immediately; a full
    /// queue is logged and the job is dropped rather than awaited.
    pub fn submit(&self, job: NotificationJob) {
        if self.sender.try_send(job).is_err() {
            tracing::error!("notification queue full, dropping notification job");
        }
    }
}

async fn deliver_legs(
    notification_repo: &Arc<dyn NotificationRepository>,
    notify_client: &Arc<dyn NotifyClient>,
    job: NotificationJob,
) {
    deliver_leg(
        notification_repo,
        notify_client,
        &job,
        job.from_account,
        "DEBIT",
    )
    .await;
    deliver_leg(
        notification_repo,
        notify_client,
        &job,
        job.to_account,
        "CREDIT",
    )
    .await;
}

async fn deliver_leg(
    notification_repo: &Arc<dyn NotificationRepository>,
    notify_client: &Arc<dyn NotifyClient>,
    job: &NotificationJob,
    account_id: AccountId,
    direction: &str,
) {
    let message = format!(
        "{direction} {} {} (tx {})",
        job.amount, job.currency, job.tx_id
    );

    if let Err(e) = notification_repo
        .insert(NewNotification {
            account_id,
            tx_id: job.tx_id,
            direction: direction.to_string(),
            amount: job.amount,
            currency: job.currency.clone(),
            message: message.clone(),
        })
        .await
    {
        tracing::error!(error = %e, tx_id = %job.tx_id, direction, "failed to persist notification row");
    }

    if let Err(e) = notify_client
        .notify(
            account_id,
            job.tx_id,
            job.amount,
            direction,
            &job.currency,
            &message,
        )
        .await
    {
        tracing::error!(error = %e, tx_id = %job.tx_id, direction, "notification RPC failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::GatewayError;
    use crate::domain::repository::MockNotificationRepository;
    use crate::domain::notify_client::MockNotifyClient;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fanout_delivers_debit_then_credit() {
        let mut repo = MockNotificationRepository::new();
        let mut client = MockNotifyClient::new();

        let mut seq = mockall::Sequence::new();
        repo.expect_insert()
            .withf(|n| n.direction == "DEBIT")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_insert()
            .withf(|n| n.direction == "CREDIT")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        client
            .expect_notify()
            .times(2)
            .returning(|_, _, _, _, _, _| Ok(()));

        let fanout = NotificationFanout::spawn(Arc::new(repo), Arc::new(client), 8);

        fanout.submit(NotificationJob {
            tx_id: TxId::new(),
            from_account: AccountId::new(),
            to_account: AccountId::new(),
            amount: 500,
            currency: "INR".to_string(),
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_fanout_swallows_notify_rpc_failure() {
        let mut repo = MockNotificationRepository::new();
        let mut client = MockNotifyClient::new();

        repo.expect_insert().times(2).returning(|_| Ok(()));
        client
            .expect_notify()
            .times(2)
            .returning(|_, _, _, _, _, _| Err(GatewayError::LedgerRpcError("down".to_string())));

        let fanout = NotificationFanout::spawn(Arc::new(repo), Arc::new(client), 8);

        fanout.submit(NotificationJob {
            tx_id: TxId::new(),
            from_account: AccountId::new(),
            to_account: AccountId::new(),
            amount: 100,
            currency: "INR".to_string(),
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

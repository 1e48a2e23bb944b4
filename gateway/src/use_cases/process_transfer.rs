use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use common::domain::{AccountId, IdempotencyStatus, TransferOut, TransferStatus};

use crate::domain::error::GatewayError;
use crate::domain::repository::{AccountRepository, IdempotencyRepository};
use crate::domain::lock::AccountLock;
use crate::domain::ledger_client::LedgerClient;
use crate::jobs::notify::{NotificationFanout, NotificationJob};

const MAX_IDEMPOTENCY_KEY_LEN: usize = 128;
const DEFAULT_CURRENCY: &str = "INR";

/// Orchestrates one `/transfer` request end to end: idempotency admission,
/// account existence, distributed lock acquisition, the ledger RPC, lock
/// release, response shaping, idempotency finalization and scheduling the
/// notification fan-out. Generalizes the single-service request/response
/// coordination pattern the rest of this workspace follows for its central
/// use case, spread here across the admission and locking steps a
/// multi-service transfer needs that a single in-process call didn't.
pub struct ProcessTransferUseCase {
    account_repo: Arc<dyn AccountRepository>,
    idempotency_repo: Arc<dyn IdempotencyRepository>,
    lock: Arc<dyn AccountLock>,
    ledger_client: Arc<dyn LedgerClient>,
    notification_fanout: Arc<NotificationFanout>,
    lock_ttl: Duration,
}

impl ProcessTransferUseCase {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        idempotency_repo: Arc<dyn IdempotencyRepository>,
        lock: Arc<dyn AccountLock>,
        ledger_client: Arc<dyn LedgerClient>,
        notification_fanout: Arc<NotificationFanout>,
        lock_ttl: Duration,
    ) -> Self {
        Self {
            account_repo,
            idempotency_repo,
            lock,
            ledger_client,
            notification_fanout,
            lock_ttl,
        }
    }

    #[tracing::instrument(skip(self))]
    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        &self,
        from_account: String,
        to_account: String,
        amount: i64,
        currency: Option<String>,
        idempotency_key: String,
    ) -> Result<TransferOut, GatewayError> {
        if idempotency_key.is_empty() || idempotency_key.len() > MAX_IDEMPOTENCY_KEY_LEN {
            return Err(GatewayError::InvalidInput(
                "idempotency_key must be 1..128 characters".to_string(),
            ));
        }
        if amount <= 0 {
            return Err(GatewayError::InvalidInput(
                "amount must be a positive integer".to_string(),
            ));
        }
        if from_account == to_account {
            return Err(GatewayError::InvalidInput(
                "from_account and to_account must differ".to_string(),
            ));
        }
        let from = AccountId::from_str(&from_account)
            .map_err(|_| GatewayError::InvalidInput("malformed from_account".to_string()))?;
        let to = AccountId::from_str(&to_account)
            .map_err(|_| GatewayError::InvalidInput("malformed to_account".to_string()))?;
        let currency = currency
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        // 1. Idempotency pre-check.
        if let Some(existing) = self.idempotency_repo.find(&idempotency_key).await? {
            match existing.status {
                IdempotencyStatus::Success | IdempotencyStatus::Failed => {
                    if let Some(response) = existing.response {
                        let out: TransferOut = serde_json::from_value(response).map_err(|e| {
                            GatewayError::RepositoryError(format!(
                                "corrupt idempotency response: {e}"
                            ))
                        })?;
                        return Ok(out);
                    }
                }
                IdempotencyStatus::InProgress => {
                    // Fall through: lock acquisition serializes this retry
                    // behind the in-flight attempt.
                }
            }
        } else {
            // 2. Idempotency admission.
            self.idempotency_repo.insert_in_progress(&idempotency_key).await?;
        }

        // 3. Account existence.
        if !self.account_repo.exists(from).await? {
            return Err(GatewayError::AccountNotFound(from_account));
        }
        if !self.account_repo.exists(to).await? {
            return Err(GatewayError::AccountNotFound(to_account));
        }

        // 4. Lock acquisition, sorted lexicographically to avoid deadlocking
        // against a transfer running in the opposite direction.
        let mut ordered = [from, to];
        ordered.sort_by_key(|id| id.to_string());
        let tokens = self.lock.acquire(ordered.to_vec(), self.lock_ttl).await?;

        // 5. Ledger RPC.
        let outcome = match self
            .ledger_client
            .transfer(from, to, amount, currency.clone(), idempotency_key.clone())
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                // 6. Lock release even on RPC failure/timeout.
                self.lock.release(tokens).await;
                // Leave the idempotency row IN_PROGRESS: an RPC timeout
                // leaves the ledger's own commit indeterminate, so the
                // only safe recovery is a retry on the same key.
                return Err(e);
            }
        };

        // 6. Lock release.
        self.lock.release(tokens).await;

        // 7. Response shaping.
        let response = TransferOut {
            tx_id: outcome.tx_id.map(|t| t.to_string()).unwrap_or_default(),
            from_account: from.to_string(),
            to_account: to.to_string(),
            amount,
            currency: outcome.currency,
            from_balance_after: outcome.from_balance_after,
            to_balance_after: outcome.to_balance_after,
            status: outcome.status.as_str().to_string(),
            message: outcome.message,
        };

        // 8. Idempotency finalization. A failure here is an operational
        // alarm, not a user-visible one: the ledger has already committed
        // (or rejected) the transfer, so the response below still stands.
        let idempotency_status = match outcome.status {
            TransferStatus::Success => IdempotencyStatus::Success,
            TransferStatus::Failed => IdempotencyStatus::Failed,
        };
        if let Err(e) = self
            .idempotency_repo
            .finalize(&idempotency_key, idempotency_status, outcome.tx_id, &response)
            .await
        {
            tracing::error!(error = %e, key = %idempotency_key, "failed to finalize idempotency record");
        }

        // 9. Schedule notifications, detached from the response path.
        if outcome.status == TransferStatus::Success {
            if let Some(tx_id) = outcome.tx_id {
                self.notification_fanout.submit(NotificationJob {
                    tx_id,
                    from_account: from,
                    to_account: to,
                    amount,
                    currency: response.currency.clone(),
                });
            }
        }

        Ok(response)
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::Json;
use common::domain::{AccountId, IdempotencyStatus, TransferStatus};
use gateway::api::http_routes::{transfer, AppState, TransferRequestBody};
use gateway::domain::ledger_client::{LedgerTransferOutcome, MockLedgerClient};
use gateway::domain::lock::MockAccountLock;
use gateway::domain::notify_client::MockNotifyClient;
use gateway::domain::repository::{
    MockAccountRepository, MockIdempotencyRepository, MockNotificationRepository,
};
use gateway::jobs::NotificationFanout;
use gateway::use_cases::{
    GetBalanceUseCase, ListAccountsUseCase, ListIdempotencyKeysUseCase, ListLedgerEntriesUseCase,
    ListNotificationsUseCase, ProcessTransferUseCase,
};

fn build_state(
    account_repo: MockAccountRepository,
    idempotency_repo: MockIdempotencyRepository,
    lock: MockAccountLock,
    ledger_client: MockLedgerClient,
) -> Arc<AppState> {
    let account_repo = Arc::new(account_repo);
    let idempotency_repo = Arc::new(idempotency_repo);
    let ledger_client = Arc::new(ledger_client);

    let notification_fanout = NotificationFanout::spawn(
        Arc::new(MockNotificationRepository::new()),
        Arc::new(MockNotifyClient::new()),
        8,
    );

    let process_transfer_use_case = ProcessTransferUseCase::new(
        account_repo.clone(),
        idempotency_repo.clone(),
        Arc::new(lock),
        ledger_client.clone(),
        notification_fanout,
        Duration::from_secs(10),
    );

    Arc::new(AppState {
        process_transfer_use_case,
        get_balance_use_case: GetBalanceUseCase::new(ledger_client.clone()),
        list_accounts_use_case: ListAccountsUseCase::new(account_repo),
        list_ledger_entries_use_case: ListLedgerEntriesUseCase::new(ledger_client),
        list_idempotency_keys_use_case: ListIdempotencyKeysUseCase::new(idempotency_repo),
        list_notifications_use_case: ListNotificationsUseCase::new(Arc::new(
            MockNotificationRepository::new(),
        )),
    })
}

#[tokio::test]
async fn test_successful_transfer_returns_success_status() {
    let from = AccountId::new();
    let to = AccountId::new();

    let mut idempotency_repo = MockIdempotencyRepository::new();
    idempotency_repo.expect_find().returning(|_| Ok(None));
    idempotency_repo
        .expect_insert_in_progress()
        .returning(|_| Ok(()));
    idempotency_repo
        .expect_finalize()
        .withf(|_, status, _, _| *status == IdempotencyStatus::Success)
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let mut account_repo = MockAccountRepository::new();
    account_repo.expect_exists().returning(|_| Ok(true));

    let mut lock = MockAccountLock::new();
    lock.expect_acquire().times(1).returning(move |accounts, _| {
        Ok(accounts
            .into_iter()
            .map(|a| (a, "token".to_string()))
            .collect::<BTreeMap<_, _>>())
    });
    lock.expect_release().times(1).returning(|_| ());

    let mut ledger_client = MockLedgerClient::new();
    ledger_client.expect_transfer().times(1).returning(|_, _, _, _, _| {
        Ok(LedgerTransferOutcome {
            tx_id: Some(common::domain::TxId::new()),
            from_balance_after: 900,
            to_balance_after: 1100,
            currency: "INR".to_string(),
            status: TransferStatus::Success,
            message: None,
        })
    });

    let state = build_state(account_repo, idempotency_repo, lock, ledger_client);

    let payload = TransferRequestBody {
        from_account: from.to_string(),
        to_account: to.to_string(),
        amount: 100,
        currency: None,
        idempotency_key: "key-success".to_string(),
    };

    let result = transfer(State(state), Json(payload)).await;

    assert!(result.is_ok());
    let body = result.unwrap().0;
    assert_eq!(body.status, "SUCCESS");
}

#[tokio::test]
async fn test_lock_conflict_surfaces_as_api_error() {
    let from = AccountId::new();
    let to = AccountId::new();

    let mut idempotency_repo = MockIdempotencyRepository::new();
    idempotency_repo.expect_find().returning(|_| Ok(None));
    idempotency_repo
        .expect_insert_in_progress()
        .returning(|_| Ok(()));
    idempotency_repo.expect_finalize().times(0);

    let mut account_repo = MockAccountRepository::new();
    account_repo.expect_exists().returning(|_| Ok(true));

    let mut lock = MockAccountLock::new();
    lock.expect_acquire()
        .times(1)
        .returning(|_, _| Err(gateway::domain::error::GatewayError::LockConflict("busy".to_string())));

    let ledger_client = MockLedgerClient::new();

    let state = build_state(account_repo, idempotency_repo, lock, ledger_client);

    let payload = TransferRequestBody {
        from_account: from.to_string(),
        to_account: to.to_string(),
        amount: 100,
        currency: None,
        idempotency_key: "key-conflict".to_string(),
    };

    let result = transfer(State(state), Json(payload)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_malformed_account_id_is_rejected_before_any_io() {
    let account_repo = MockAccountRepository::new();
    let idempotency_repo = MockIdempotencyRepository::new();
    let lock = MockAccountLock::new();
    let ledger_client = MockLedgerClient::new();

    let state = build_state(account_repo, idempotency_repo, lock, ledger_client);

    let payload = TransferRequestBody {
        from_account: "not-a-uuid".to_string(),
        to_account: AccountId::new().to_string(),
        amount: 100,
        currency: None,
        idempotency_key: "key-bad-uuid".to_string(),
    };

    let result = transfer(State(state), Json(payload)).await;

    assert!(result.is_err());
}

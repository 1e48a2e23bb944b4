pub mod get_balance;
pub mod list_accounts;
pub mod list_idempotency_keys;
pub mod list_ledger_entries;
pub mod list_notifications;
pub mod process_transfer;

pub use get_balance::GetBalanceUseCase;
pub use list_accounts::ListAccountsUseCase;
pub use list_idempotency_keys::ListIdempotencyKeysUseCase;
pub use list_ledger_entries::ListLedgerEntriesUseCase;
pub use list_notifications::ListNotificationsUseCase;
pub use process_transfer::ProcessTransferUseCase;

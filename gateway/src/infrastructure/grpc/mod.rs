pub mod ledger_client;
pub mod notify_client;

pub use ledger_client::GrpcLedgerClient;
pub use notify_client::GrpcNotifyClient;

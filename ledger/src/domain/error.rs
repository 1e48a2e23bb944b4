use thiserror::Error;

/// Infrastructure-level failures only. Domain-level transfer failures
/// (account not found, currency mismatch, insufficient funds, non-positive
/// amount) are not represented here — they are a normal, successful RPC
/// outcome carrying `status = FAILED` and a diagnostic message, not an error.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::RepositoryError(err.to_string())
    }
}

impl From<LedgerError> for tonic::Status {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::RepositoryError(e) => {
                tracing::error!("Ledger repository error: {}", e);
                tonic::Status::internal("internal error")
            }
        }
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Gateway-level errors, mapped to HTTP status codes. Domain-level transfer
/// rejections (bad currency, insufficient funds) are NOT represented here —
/// those come back from the ledger as a successful `TransferOut` with
/// `status = FAILED`, never as a `GatewayError`.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Lock conflict: {0}")]
    LockConflict(String),

    #[error("Ledger RPC error: {0}")]
    LedgerRpcError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        GatewayError::RepositoryError(err.to_string())
    }
}

impl From<tonic::Status> for GatewayError {
    fn from(status: tonic::Status) -> Self {
        GatewayError::LedgerRpcError(status.message().to_string())
    }
}

pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            GatewayError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            GatewayError::AccountNotFound(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            GatewayError::LockConflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            GatewayError::LedgerRpcError(ref e) => {
                tracing::error!("Ledger RPC error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            GatewayError::RepositoryError(ref e) => {
                tracing::error!("Gateway repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}

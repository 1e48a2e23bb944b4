use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use common::proto::ledger_service_server::LedgerServiceServer;
use ledger::api::LedgerGrpcService;
use ledger::infrastructure::persistence::PostgresLedgerRepository;
use ledger::use_cases::{GetAllEntriesUseCase, GetBalanceUseCase, TransferUseCase};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting Ledger Service...");

    let postgres_host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "postgres".to_string());
    let postgres_port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let postgres_db = env::var("POSTGRES_DB").unwrap_or_else(|_| "easpayments".to_string());
    let postgres_user = env::var("POSTGRES_USER").unwrap_or_else(|_| "easuser".to_string());
    let postgres_password = env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "easpass".to_string());
    let database_url = format!(
        "postgres://{postgres_user}:{postgres_password}@{postgres_host}:{postgres_port}/{postgres_db}"
    );

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations applied");

    let ledger_repo = Arc::new(PostgresLedgerRepository::new(pool));

    let transfer_use_case = TransferUseCase::new(ledger_repo.clone());
    let get_balance_use_case = GetBalanceUseCase::new(ledger_repo.clone());
    let get_all_entries_use_case = GetAllEntriesUseCase::new(ledger_repo);

    let grpc_service = LedgerGrpcService::new(
        transfer_use_case,
        get_balance_use_case,
        get_all_entries_use_case,
    );

    let grpc_host = env::var("GRPC_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let grpc_port = env::var("LEDGER_GRPC_PORT").unwrap_or_else(|_| "50051".to_string());
    let grpc_addr = format!("{}:{}", grpc_host, grpc_port).parse()?;

    info!("gRPC server listening on {}", grpc_addr);

    tonic::transport::Server::builder()
        .add_service(LedgerServiceServer::new(grpc_service))
        .serve(grpc_addr)
        .await?;

    Ok(())
}

use std::env;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gateway::api::http_routes::{
    self, AppState, BalanceOut, TransferRequestBody,
};
use gateway::api::response::ApiResponse;
use gateway::infrastructure::grpc::{GrpcLedgerClient, GrpcNotifyClient};
use gateway::infrastructure::lock::RedisAccountLock;
use gateway::infrastructure::persistence::{
    PostgresAccountRepository, PostgresIdempotencyRepository, PostgresNotificationRepository,
};
use gateway::jobs::NotificationFanout;
use gateway::use_cases::{
    GetBalanceUseCase, ListAccountsUseCase, ListIdempotencyKeysUseCase, ListLedgerEntriesUseCase,
    ListNotificationsUseCase, ProcessTransferUseCase,
};

const NOTIFICATION_QUEUE_CAPACITY: usize = 256;

#[derive(OpenApi)]
#[openapi(
    paths(
        http_routes::transfer,
        http_routes::balance,
        http_routes::health,
        http_routes::list_accounts,
        http_routes::list_ledger_entries,
        http_routes::list_idempotency_keys,
        http_routes::list_notifications
    ),
    components(schemas(
        TransferRequestBody,
        BalanceOut,
        ApiResponse<serde_json::Value>
    ))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting gateway...");

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

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Connected to Postgres");

    let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| "redis://redis:6379/0".to_string());
    let redis_cfg = deadpool_redis::Config::from_url(redis_url);
    let redis_pool = redis_cfg.create_pool(Some(deadpool_redis::Runtime::Tokio1))?;

    let ledger_grpc_target =
        env::var("LEDGER_GRPC_TARGET").unwrap_or_else(|_| "localhost:50051".to_string());
    let notify_grpc_target =
        env::var("NOTIFY_GRPC_TARGET").unwrap_or_else(|_| "notifications:50052".to_string());

    let ledger_client =
        Arc::new(GrpcLedgerClient::connect(format!("http://{ledger_grpc_target}")).await?);
    let notify_client =
        Arc::new(GrpcNotifyClient::connect(format!("http://{notify_grpc_target}")).await?);

    info!("Connected to ledger at {ledger_grpc_target} and notifications at {notify_grpc_target}");

    let account_repo = Arc::new(PostgresAccountRepository::new(pool.clone()));
    let idempotency_repo = Arc::new(PostgresIdempotencyRepository::new(pool.clone()));
    let notification_repo = Arc::new(PostgresNotificationRepository::new(pool.clone()));
    let lock = Arc::new(RedisAccountLock::new(redis_pool));

    let notification_fanout = NotificationFanout::spawn(
        notification_repo.clone(),
        notify_client.clone(),
        NOTIFICATION_QUEUE_CAPACITY,
    );

    let lock_ttl_secs: u64 = env::var("LOCK_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let process_transfer_use_case = ProcessTransferUseCase::new(
        account_repo.clone(),
        idempotency_repo.clone(),
        lock,
        ledger_client.clone(),
        notification_fanout,
        Duration::from_secs(lock_ttl_secs),
    );
    let get_balance_use_case = GetBalanceUseCase::new(ledger_client.clone());
    let list_accounts_use_case = ListAccountsUseCase::new(account_repo);
    let list_ledger_entries_use_case = ListLedgerEntriesUseCase::new(ledger_client);
    let list_idempotency_keys_use_case = ListIdempotencyKeysUseCase::new(idempotency_repo);
    let list_notifications_use_case = ListNotificationsUseCase::new(notification_repo);

    let app_state = Arc::new(AppState {
        process_transfer_use_case,
        get_balance_use_case,
        list_accounts_use_case,
        list_ledger_entries_use_case,
        list_idempotency_keys_use_case,
        list_notifications_use_case,
    });

    let app = http_routes::routes(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new("static"));

    let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let api_port = env::var("API_PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{api_host}:{api_port}");

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

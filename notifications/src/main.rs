use std::env;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use common::proto::notification_service_server::NotificationServiceServer;
use notifications::api::NotificationGrpcService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting Notifications Service...");

    let grpc_host = env::var("GRPC_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let grpc_port = env::var("NOTIFY_GRPC_PORT").unwrap_or_else(|_| "50052".to_string());
    let grpc_addr = format!("{}:{}", grpc_host, grpc_port).parse()?;

    info!("gRPC server listening on {}", grpc_addr);

    tonic::transport::Server::builder()
        .add_service(NotificationServiceServer::new(NotificationGrpcService))
        .serve(grpc_addr)
        .await?;

    Ok(())
}

pub mod account_repository;
pub mod idempotency_repository;
pub mod notification_repository;

pub use account_repository::PostgresAccountRepository;
pub use idempotency_repository::PostgresIdempotencyRepository;
pub use notification_repository::PostgresNotificationRepository;

pub mod grpc;
pub mod lock;
pub mod persistence;

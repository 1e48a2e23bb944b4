pub mod redis_lock;

pub use redis_lock::RedisAccountLock;

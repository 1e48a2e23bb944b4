use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use common::domain::AccountId;
use deadpool_redis::redis::{AsyncCommands, ExistenceCheck, Script, SetExpiry, SetOptions};
use deadpool_redis::Pool;
use uuid::Uuid;

use crate::domain::error::GatewayError;
use crate::domain::lock::AccountLock;

/// Only delete the key if it still holds the caller's token — prevents a
/// slow caller from releasing a lock re-acquired by someone else after
/// the original token's TTL expired.
const RELEASE_SCRIPT: &str = r#"
    if redis.call("get", KEYS[1]) == ARGV[1] then
        return redis.call("del", KEYS[1])
    else
        return 0
    end
"#;

pub struct RedisAccountLock {
    pool: Pool,
}

impl RedisAccountLock {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    fn key_for(account_id: AccountId) -> String {
        format!("acctlock:{account_id}")
    }
}

#[async_trait]
impl AccountLock for RedisAccountLock {
    async fn acquire(
        &self,
        accounts: Vec<AccountId>,
        ttl: Duration,
    ) -> Result<BTreeMap<AccountId, String>, GatewayError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| GatewayError::LockConflict(format!("redis pool: {e}")))?;

        let mut acquired: BTreeMap<AccountId, String> = BTreeMap::new();

        for account_id in accounts {
            let token = Uuid::new_v4().to_string();
            let key = Self::key_for(account_id);

            let options = SetOptions::default()
                .conditional_set(ExistenceCheck::NX)
                .with_expiration(SetExpiry::EX(ttl.as_secs() as usize));

            let got: Option<String> = conn
                .set_options(&key, &token, options)
                .await
                .map_err(|e| GatewayError::LockConflict(format!("redis set: {e}")))?;

            if got.is_none() {
                self.release(acquired).await;
                return Err(GatewayError::LockConflict(format!(
                    "account {account_id} is already locked"
                )));
            }

            acquired.insert(account_id, token);
        }

        Ok(acquired)
    }

    async fn release(&self, tokens: BTreeMap<AccountId, String>) {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!("failed to get redis connection to release locks: {}", e);
                return;
            }
        };

        for (account_id, token) in tokens {
            let key = Self::key_for(account_id);
            let result: Result<i64, _> = Script::new(RELEASE_SCRIPT)
                .key(&key)
                .arg(&token)
                .invoke_async(&mut conn)
                .await;

            if let Err(e) = result {
                tracing::error!("failed to release lock for account {}: {}", account_id, e);
            }
        }
    }
}

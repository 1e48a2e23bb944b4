use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use common::domain::AccountId;

use crate::domain::error::GatewayError;

/// Per-account distributed mutual exclusion. Callers acquire the full set
/// of accounts touched by one transfer and release all of them on every
/// exit path. `BTreeMap` keeps tokens naturally ordered by account id,
/// matching the lexicographic acquisition order the contract requires.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountLock: Send + Sync {
    /// Acquires locks for every account in `accounts`, already sorted by
    /// the caller. On partial failure, implementations release whatever
    /// they acquired in this call before returning `Err`.
    async fn acquire(
        &self,
        accounts: Vec<AccountId>,
        ttl: Duration,
    ) -> Result<BTreeMap<AccountId, String>, GatewayError>;

    /// Releases every held lock via compare-and-delete on its token.
    async fn release(&self, tokens: BTreeMap<AccountId, String>);
}

use async_trait::async_trait;
use common::domain::{Account, AccountId, Direction, LedgerEntryPair, TxId};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::error::LedgerError;
use crate::domain::repository::{LedgerRepository, TransferAttempt};

/// Postgres-backed ledger repository.
///
/// `record_transfer` owns the single database transaction: `REPEATABLE READ`
/// isolation plus a `SELECT ... FOR UPDATE` gate on the source account's row,
/// so a concurrent transfer from the same source cannot pass the funds check
/// while this one is still in flight.
pub struct PostgresLedgerRepository {
    pool: PgPool,
}

impl PostgresLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// start_balance plus credits minus debits over ledger_entries, evaluated
    /// against whatever executor (pool or open transaction) the caller passes in.
    async fn balance_with<'e, E>(executor: E, account_id: AccountId) -> Result<i64, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(a.start_balance, 0)
                + COALESCE(SUM(CASE WHEN le.direction = 'CREDIT' THEN le.amount ELSE 0 END), 0)
                - COALESCE(SUM(CASE WHEN le.direction = 'DEBIT' THEN le.amount ELSE 0 END), 0)
            FROM accounts a
            LEFT JOIN ledger_entries le ON le.account_id = a.id
            WHERE a.id = $1
            GROUP BY a.start_balance
            "#,
        )
        .bind(account_id)
        .fetch_one(executor)
        .await?;

        Ok(row.0)
    }

    async fn currency_for(
        tx: &mut Transaction<'_, Postgres>,
        account_id: AccountId,
        lock: bool,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = if lock {
            "SELECT currency FROM accounts WHERE id = $1 FOR UPDATE"
        } else {
            "SELECT currency FROM accounts WHERE id = $1"
        };
        let row: Option<(String,)> = sqlx::query_as(query)
            .bind(account_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.map(|(c,)| c))
    }
}

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn balance(&self, id: AccountId) -> Result<i64, LedgerError> {
        // No matching account row means no start_balance to anchor the
        // GROUP BY, so the query legitimately returns nothing; that is not
        // a repository error here, callers decide what "unknown account"
        // should mean (GetBalance defaults it to zero, see below).
        match Self::balance_with(&self.pool, id).await {
            Ok(bal) => Ok(bal),
            Err(sqlx::Error::RowNotFound) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    async fn record_transfer(
        &self,
        from_account: AccountId,
        to_account: AccountId,
        amount: i64,
    ) -> Result<TransferAttempt, LedgerError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let from_currency = Self::currency_for(&mut tx, from_account, true).await?;
        let to_currency = Self::currency_for(&mut tx, to_account, false).await?;

        let (from_currency, to_currency) = match (from_currency, to_currency) {
            (Some(f), Some(t)) => (f, t),
            _ => {
                tx.rollback().await?;
                return Ok(TransferAttempt::Failed("Account not found".to_string()));
            }
        };

        if from_currency != to_currency {
            tx.rollback().await?;
            return Ok(TransferAttempt::Failed("Currency mismatch".to_string()));
        }

        let from_balance_before = Self::balance_with(&mut *tx, from_account).await?;
        if from_balance_before < amount {
            tx.rollback().await?;
            return Ok(TransferAttempt::Failed("Insufficient funds".to_string()));
        }

        let tx_id = TxId::new();

        sqlx::query(
            "INSERT INTO ledger_entries (tx_id, account_id, direction, amount) VALUES ($1, $2, $3, $4)",
        )
        .bind(tx_id)
        .bind(from_account)
        .bind(Direction::Debit)
        .bind(amount)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO ledger_entries (tx_id, account_id, direction, amount) VALUES ($1, $2, $3, $4)",
        )
        .bind(tx_id)
        .bind(to_account)
        .bind(Direction::Credit)
        .bind(amount)
        .execute(&mut *tx)
        .await?;

        let from_balance_after = Self::balance_with(&mut *tx, from_account).await?;
        let to_balance_after = Self::balance_with(&mut *tx, to_account).await?;

        // Defense in depth: the funds check above already guarantees this,
        // but we never let a committed row pair leave a balance negative.
        if from_balance_after < 0 {
            tx.rollback().await?;
            return Ok(TransferAttempt::Failed("Insufficient funds".to_string()));
        }

        tx.commit().await?;

        Ok(TransferAttempt::Success {
            tx_id,
            currency: from_currency,
            from_balance_after,
            to_balance_after,
        })
    }

    async fn get_all_entries(&self) -> Result<Vec<LedgerEntryPair>, LedgerError> {
        let rows: Vec<(TxId, AccountId, AccountId, i64, String, chrono::DateTime<chrono::Utc>)> = sqlx::query_as(
            r#"
            SELECT
                debit_leg.tx_id,
                debit_leg.account_id AS from_account,
                credit_leg.account_id AS to_account,
                debit_leg.amount,
                accounts.currency,
                debit_leg.created_at
            FROM ledger_entries debit_leg
            JOIN ledger_entries credit_leg ON debit_leg.tx_id = credit_leg.tx_id
            JOIN accounts ON accounts.id = debit_leg.account_id
            WHERE debit_leg.direction = 'DEBIT' AND credit_leg.direction = 'CREDIT'
            ORDER BY debit_leg.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(tx_id, from_account, to_account, amount, currency, created_at)| LedgerEntryPair {
                tx_id,
                from_account,
                to_account,
                amount,
                currency,
                created_at,
            })
            .collect())
    }
}

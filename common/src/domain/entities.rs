use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountId, TxId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ledger_direction", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "DEBIT",
            Direction::Credit => "CREDIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "idempotency_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdempotencyStatus {
    InProgress,
    Success,
    Failed,
}

impl IdempotencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdempotencyStatus::InProgress => "IN_PROGRESS",
            IdempotencyStatus::Success => "SUCCESS",
            IdempotencyStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    Success,
    Failed,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Success => "SUCCESS",
            TransferStatus::Failed => "FAILED",
        }
    }
}

/// Externally provisioned ledger participant. Immutable by the core transfer path.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub currency: String,
    pub start_balance: i64,
    pub created_at: DateTime<Utc>,
}

/// One row of double-entry bookkeeping. Append-only: for every `tx_id` exactly one
/// DEBIT and one CREDIT row exist, with equal `amount` and distinct `account_id`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LedgerEntry {
    pub id: i64,
    pub tx_id: TxId,
    pub account_id: AccountId,
    pub direction: Direction,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// A paired (DEBIT, CREDIT) view of one transaction, as returned by `GetAllEntries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryPair {
    pub tx_id: TxId,
    pub from_account: AccountId,
    pub to_account: AccountId,
    pub amount: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a `/transfer` request, also the byte-for-byte replayed idempotency response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferOut {
    pub tx_id: String,
    pub from_account: String,
    pub to_account: String,
    pub amount: i64,
    pub currency: String,
    pub from_balance_after: i64,
    pub to_balance_after: i64,
    pub status: String,
    pub message: Option<String>,
}

/// Persisted idempotency admission/finalization record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IdempotencyKeyRecord {
    pub key: String,
    pub tx_id: Option<TxId>,
    pub status: IdempotencyStatus,
    pub response: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// One notification leg persisted by the gateway's fan-out.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub account_id: AccountId,
    pub tx_id: TxId,
    pub direction: Direction,
    pub amount: i64,
    pub currency: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

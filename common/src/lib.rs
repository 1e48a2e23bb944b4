//! Shared types for the EASPayments workspace.
//!
//! This crate holds the pieces that would otherwise be duplicated across
//! `gateway`, `ledger` and `notifications`: the generated gRPC stubs and the
//! domain primitives that cross the wire (account/ledger-entry/idempotency
//! records).

pub mod domain;

/// Generated client + server stubs for `proto/payment.proto`.
pub mod proto {
    tonic::include_proto!("payment");
}

//! # Outbound Ports (Driven Ports)
//!
//! SPIs the gateway consumes: the external wallet signer and a clock.

use crate::domain::{SignedTransaction, TransactionDraft};
use shared_types::Address;

/// Signing failures, as reported by the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignError {
    /// No wallet session is connected.
    NoSession,
    /// The user or the wallet declined to sign.
    Rejected,
}

/// The external signing capability, consumed by reference. The gateway
/// never owns key material; "is a signer available" maps to "is a session
/// address present".
#[async_trait::async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address of the connected session, if any.
    fn active_address(&self) -> Option<Address>;

    /// Sign a transaction draft. The wallet assigns the content-derived
    /// transaction id as part of signing.
    async fn sign(&self, draft: &TransactionDraft) -> Result<SignedTransaction, SignError>;
}

/// Abstract interface for time operations (for testability). Timestamps
/// are client-clock milliseconds, used purely for ordering.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

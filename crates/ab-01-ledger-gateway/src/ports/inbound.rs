//! # Inbound Port (Driving Port)
//!
//! The gateway API consumed by the query layer (ab-03).

use crate::domain::{TagFilter, TagPair};
use shared_types::{LedgerError, TransactionId};

/// Thin adapter over the ledger network: index lookup, payload fetch, and
/// signed submission. Stateless per call; all failures surface to the
/// caller unretried.
#[async_trait::async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Query the external index for transactions matching ALL given
    /// filters. The index guarantees no ordering; callers re-sort.
    ///
    /// Zero matches is not an error; it is the empty list.
    async fn fetch_by_tags(
        &self,
        filters: &[TagFilter],
        limit: Option<usize>,
    ) -> Result<Vec<TransactionId>, LedgerError>;

    /// Retrieve a transaction's opaque body.
    ///
    /// Fails with [`LedgerError::NotFound`] when the ledger has no such
    /// transaction, [`LedgerError::NetworkFailure`] when it cannot be
    /// reached.
    async fn fetch_payload(&self, id: &TransactionId) -> Result<Vec<u8>, LedgerError>;

    /// Build a transaction from `data` plus `tags` (attached in the given
    /// order), have the external signer sign it, submit it, and return the
    /// assigned id.
    ///
    /// Fails with [`LedgerError::NoSignerAvailable`] when no session is
    /// connected, [`LedgerError::SigningRejected`] when the signer
    /// declines, [`LedgerError::SubmissionFailed`] when the ledger rejects
    /// the signed transaction.
    async fn submit(
        &self,
        data: Vec<u8>,
        tags: Vec<TagPair>,
    ) -> Result<TransactionId, LedgerError>;
}

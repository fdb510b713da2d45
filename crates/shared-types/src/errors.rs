//! # Error Taxonomy
//!
//! The failure vocabulary shared by every layer. Propagation policy:
//!
//! - per-item failures inside a list read are absorbed locally (logged,
//!   item skipped);
//! - singular lookups degrade to "absent" on `NotFound`/`MalformedPayload`,
//!   but `NetworkFailure` propagates so callers can tell "truly missing"
//!   from "could not check";
//! - write-path failures always propagate, never silently.

use thiserror::Error;

/// Errors surfaced by the gateway, query, and cache layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger has no such record.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The record exists but its payload is unreadable by this schema.
    /// There is no payload versioning; shape drift is unrecoverable for
    /// that record.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Transport failure or index unreachable.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// A write was attempted without a connected signing session.
    #[error("no signer available")]
    NoSignerAvailable,

    /// The external signer declined to sign the transaction.
    #[error("signing rejected")]
    SigningRejected,

    /// The ledger rejected or failed to accept a signed transaction.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// A client-side precondition failed before any network call was made.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Entity field the rule applies to.
        field: &'static str,
        /// What the rule requires.
        reason: String,
    },
}

impl LedgerError {
    /// Whether an automatic retry could plausibly help. Only transport
    /// failures qualify; resubmitting a write could create duplicate
    /// records, and the other variants are deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = LedgerError::Validation {
            field: "bio",
            reason: "at most 100 characters".to_string(),
        };
        assert!(err.to_string().contains("bio"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_only_network_failures_are_retryable() {
        assert!(LedgerError::NetworkFailure("timeout".into()).is_retryable());
        assert!(!LedgerError::NotFound("tx".into()).is_retryable());
        assert!(!LedgerError::SubmissionFailed("rejected".into()).is_retryable());
        assert!(!LedgerError::NoSignerAvailable.is_retryable());
    }
}

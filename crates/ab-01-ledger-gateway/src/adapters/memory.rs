//! # In-Memory Ledger Adapter
//!
//! A synthetic ledger for tests: transactions live in a Vec, the "index"
//! is a linear scan over tags, and per-transaction payload failures can be
//! injected to exercise the failure-isolation contracts of the upper
//! layers. Also provides [`MemorySigner`], a wallet stand-in with a
//! connect/disconnect toggle and a rejection switch.

use crate::domain::{SignedTransaction, TagFilter, TagPair, TransactionDraft};
use crate::ports::inbound::LedgerGateway;
use crate::ports::outbound::{SignError, WalletSigner};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, LedgerError, TransactionId};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

struct StoredTransaction {
    id: TransactionId,
    data: Vec<u8>,
    tags: Vec<TagPair>,
}

#[derive(Default)]
struct LedgerState {
    transactions: Vec<StoredTransaction>,
    unreachable: HashSet<TransactionId>,
}

/// In-memory [`LedgerGateway`] with call counters.
pub struct MemoryLedger {
    signer: Arc<dyn WalletSigner>,
    state: Mutex<LedgerState>,
    fetch_by_tags_calls: AtomicUsize,
    fetch_payload_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

impl MemoryLedger {
    pub fn new(signer: Arc<dyn WalletSigner>) -> Self {
        Self {
            signer,
            state: Mutex::new(LedgerState::default()),
            fetch_by_tags_calls: AtomicUsize::new(0),
            fetch_payload_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
        }
    }

    /// Insert a transaction directly, bypassing the signer. Tests use this
    /// to stage reads with chosen ids.
    pub fn seed_transaction(
        &self,
        id: impl Into<TransactionId>,
        data: Vec<u8>,
        tags: Vec<TagPair>,
    ) {
        let mut state = self.state.lock();
        state.transactions.push(StoredTransaction {
            id: id.into(),
            data,
            tags,
        });
    }

    /// Make payload fetches for `id` fail with a network failure while the
    /// id stays visible to the index.
    pub fn break_payload(&self, id: impl Into<TransactionId>) {
        self.state.lock().unreachable.insert(id.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.lock().transactions.iter().any(|tx| tx.id == id)
    }

    /// Tags recorded for a stored transaction, in attachment order.
    pub fn tags_of(&self, id: &str) -> Option<Vec<TagPair>> {
        self.state
            .lock()
            .transactions
            .iter()
            .find(|tx| tx.id == id)
            .map(|tx| tx.tags.clone())
    }

    pub fn fetch_by_tags_calls(&self) -> usize {
        self.fetch_by_tags_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_payload_calls(&self) -> usize {
        self.fetch_payload_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

fn matches_filters(tags: &[TagPair], filters: &[TagFilter]) -> bool {
    filters.iter().all(|filter| {
        tags.iter()
            .any(|tag| tag.name == filter.name && filter.values.contains(&tag.value))
    })
}

#[async_trait]
impl LedgerGateway for MemoryLedger {
    async fn fetch_by_tags(
        &self,
        filters: &[TagFilter],
        limit: Option<usize>,
    ) -> Result<Vec<TransactionId>, LedgerError> {
        self.fetch_by_tags_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        let mut ids: Vec<TransactionId> = state
            .transactions
            .iter()
            .filter(|tx| matches_filters(&tx.tags, filters))
            .map(|tx| tx.id.clone())
            .collect();
        if let Some(limit) = limit {
            ids.truncate(limit);
        }
        debug!("[ab-01] memory index matched {} transaction(s)", ids.len());
        Ok(ids)
    }

    async fn fetch_payload(&self, id: &TransactionId) -> Result<Vec<u8>, LedgerError> {
        self.fetch_payload_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        if state.unreachable.contains(id) {
            return Err(LedgerError::NetworkFailure(format!(
                "payload fetch {} failed",
                id
            )));
        }
        state
            .transactions
            .iter()
            .find(|tx| &tx.id == id)
            .map(|tx| tx.data.clone())
            .ok_or_else(|| LedgerError::NotFound(id.clone()))
    }

    async fn submit(
        &self,
        data: Vec<u8>,
        tags: Vec<TagPair>,
    ) -> Result<TransactionId, LedgerError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if self.signer.active_address().is_none() {
            return Err(LedgerError::NoSignerAvailable);
        }

        let draft = TransactionDraft { data, tags };
        let signed = self.signer.sign(&draft).await.map_err(|e| match e {
            SignError::NoSession => LedgerError::NoSignerAvailable,
            SignError::Rejected => LedgerError::SigningRejected,
        })?;

        let mut state = self.state.lock();
        state.transactions.push(StoredTransaction {
            id: signed.id.clone(),
            data: draft.data,
            tags: draft.tags,
        });
        Ok(signed.id)
    }
}

/// Wallet stand-in for tests.
pub struct MemorySigner {
    address: Mutex<Option<Address>>,
    reject: AtomicBool,
    sequence: AtomicU64,
}

impl MemorySigner {
    pub fn connected(address: impl Into<Address>) -> Self {
        Self {
            address: Mutex::new(Some(address.into())),
            reject: AtomicBool::new(false),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            address: Mutex::new(None),
            reject: AtomicBool::new(false),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn connect(&self, address: impl Into<Address>) {
        *self.address.lock() = Some(address.into());
    }

    pub fn disconnect(&self) {
        *self.address.lock() = None;
    }

    /// Make subsequent sign requests fail as user-declined.
    pub fn reject_signing(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletSigner for MemorySigner {
    fn active_address(&self) -> Option<Address> {
        self.address.lock().clone()
    }

    async fn sign(&self, draft: &TransactionDraft) -> Result<SignedTransaction, SignError> {
        let Some(address) = self.active_address() else {
            return Err(SignError::NoSession);
        };
        if self.reject.load(Ordering::SeqCst) {
            return Err(SignError::Rejected);
        }
        let id = format!("mem-{:08}", self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
        let body = serde_json::json!({
            "id": id,
            "owner": address,
            "data_size": draft.data.len(),
            "tags": draft.tags,
        });
        Ok(SignedTransaction { id, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, value: &str) -> TagPair {
        TagPair::new(name, value)
    }

    #[tokio::test]
    async fn test_filters_and_across_filters_or_within_values() {
        let signer = Arc::new(MemorySigner::connected("addr-1"));
        let ledger = MemoryLedger::new(signer);
        ledger.seed_transaction(
            "tx-a",
            b"{}".to_vec(),
            vec![tag("App-Name", "AR-Blog-App"), tag("Type", "AR-Blog-Post")],
        );
        ledger.seed_transaction(
            "tx-b",
            b"{}".to_vec(),
            vec![tag("App-Name", "AR-Blog-App"), tag("Type", "AR-Blog-Profile")],
        );
        ledger.seed_transaction("tx-c", b"{}".to_vec(), vec![tag("App-Name", "other-app")]);

        let both_types = vec![TagFilter {
            name: "Type".to_string(),
            values: vec!["AR-Blog-Post".to_string(), "AR-Blog-Profile".to_string()],
        }];
        let ids = ledger.fetch_by_tags(&both_types, None).await.unwrap();
        assert_eq!(ids, vec!["tx-a".to_string(), "tx-b".to_string()]);

        let narrowed = vec![
            TagFilter::exact("App-Name", "AR-Blog-App"),
            TagFilter::exact("Type", "AR-Blog-Post"),
        ];
        let ids = ledger.fetch_by_tags(&narrowed, None).await.unwrap();
        assert_eq!(ids, vec!["tx-a".to_string()]);
    }

    #[tokio::test]
    async fn test_zero_matches_is_the_empty_list_not_an_error() {
        let ledger = MemoryLedger::new(Arc::new(MemorySigner::disconnected()));
        let ids = ledger
            .fetch_by_tags(&[TagFilter::exact("App-Name", "AR-Blog-App")], Some(10))
            .await
            .unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_signer_fails_before_storing() {
        let ledger = MemoryLedger::new(Arc::new(MemorySigner::disconnected()));
        let err = ledger.submit(b"{}".to_vec(), vec![]).await.unwrap_err();
        assert_eq!(err, LedgerError::NoSignerAvailable);
        assert_eq!(ledger.fetch_by_tags(&[], None).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_rejected_signature_surfaces_as_signing_rejected() {
        let signer = Arc::new(MemorySigner::connected("addr-1"));
        signer.reject_signing(true);
        let ledger = MemoryLedger::new(signer);
        let err = ledger.submit(b"{}".to_vec(), vec![]).await.unwrap_err();
        assert_eq!(err, LedgerError::SigningRejected);
    }

    #[tokio::test]
    async fn test_broken_payload_is_a_network_failure_not_absent() {
        let ledger = MemoryLedger::new(Arc::new(MemorySigner::disconnected()));
        ledger.seed_transaction("tx-a", b"{}".to_vec(), vec![]);
        ledger.break_payload("tx-a");
        let err = ledger.fetch_payload(&"tx-a".to_string()).await.unwrap_err();
        assert!(matches!(err, LedgerError::NetworkFailure(_)));
    }
}

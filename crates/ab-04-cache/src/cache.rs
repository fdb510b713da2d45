//! # Blog Cache
//!
//! The read/mutation surface the UI consumes. Reads go through per-identity
//! slots with stale-while-revalidate; mutations delegate to the query layer
//! and invalidate exactly the identities the write could have staled.

use crate::config::CacheConfig;
use crate::keys::QueryKey;
use crate::retry::retry_delay;
use crate::slot::{CachedValue, QuerySnapshot, QueryStatus, Slot, SlotState};
use ab_03_query::BlogQueries;
use parking_lot::Mutex;
use shared_types::{LedgerError, Post, PostDraft, Profile, ProfileDraft, TransactionId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Request-scoped cache over a [`BlogQueries`] implementation.
pub struct BlogCache {
    queries: Arc<dyn BlogQueries>,
    config: CacheConfig,
    slots: Mutex<HashMap<QueryKey, Arc<Slot>>>,
}

enum Plan {
    /// Value is fresh, or a refresh is already covering it; serve it.
    Serve(CachedValue),
    /// A fetch is in flight with nothing to show yet; join it instead of
    /// issuing a duplicate call.
    Wait(watch::Receiver<QuerySnapshot>),
    /// Nothing servable; start a fetch and wait for it to settle.
    Fetch { generation: u64 },
    /// Stale value present; serve it and refresh in the background.
    Refresh { generation: u64, value: CachedValue },
}

impl BlogCache {
    pub fn new(queries: Arc<dyn BlogQueries>, config: CacheConfig) -> Self {
        Self {
            queries,
            config,
            slots: Mutex::new(HashMap::new()),
        }
    }

    // ---------------------------------------------------------------- reads

    /// Profile for an address. An absent/empty address resolves to absent
    /// immediately with no network traffic (not-yet-connected sessions).
    pub async fn profile(&self, address: Option<&str>) -> Result<Option<Profile>, LedgerError> {
        let Some(address) = address.filter(|a| !a.trim().is_empty()) else {
            return Ok(None);
        };
        match self.read(QueryKey::Profile(address.to_string())).await? {
            CachedValue::Profile(profile) => Ok(profile),
            _ => Ok(None),
        }
    }

    /// Global feed, newest first, bounded to `limit`.
    pub async fn feed(&self, limit: usize) -> Result<Vec<Post>, LedgerError> {
        match self.read(QueryKey::Feed { limit }).await? {
            CachedValue::Posts(posts) => Ok(posts),
            _ => Ok(Vec::new()),
        }
    }

    /// Every post by one author, newest first.
    pub async fn user_posts(&self, address: Option<&str>) -> Result<Vec<Post>, LedgerError> {
        let Some(address) = address.filter(|a| !a.trim().is_empty()) else {
            return Ok(Vec::new());
        };
        match self.read(QueryKey::UserPosts(address.to_string())).await? {
            CachedValue::Posts(posts) => Ok(posts),
            _ => Ok(Vec::new()),
        }
    }

    /// Posts carrying a label, newest first.
    pub async fn labeled_posts(&self, label: Option<&str>) -> Result<Vec<Post>, LedgerError> {
        let Some(label) = label.filter(|l| !l.trim().is_empty()) else {
            return Ok(Vec::new());
        };
        match self.read(QueryKey::TagSearch(label.trim().to_string())).await? {
            CachedValue::Posts(posts) => Ok(posts),
            _ => Ok(Vec::new()),
        }
    }

    /// A single post by id.
    pub async fn post(&self, id: Option<&str>) -> Result<Option<Post>, LedgerError> {
        let Some(id) = id.filter(|i| !i.trim().is_empty()) else {
            return Ok(None);
        };
        match self.read(QueryKey::Post(id.to_string())).await? {
            CachedValue::Post(post) => Ok(post),
            _ => Ok(None),
        }
    }

    // ------------------------------------------------------------ mutations

    /// Create a profile, then invalidate that address's profile identity.
    /// One-shot: a failed write surfaces immediately, since resubmitting
    /// could create a duplicate record.
    pub async fn create_profile(
        &self,
        draft: &ProfileDraft,
        address: &str,
    ) -> Result<TransactionId, LedgerError> {
        let id = self.queries.create_profile(draft, address).await?;
        self.invalidate(&QueryKey::Profile(address.to_string()));
        info!("[ab-04] profile created in {}", id);
        Ok(id)
    }

    /// Publish a post, then invalidate the feed windows, the author's
    /// listing, and any label searches for the labels the post carries.
    /// The author's profile identity is untouched; the write cannot stale
    /// it.
    pub async fn create_blog_post(
        &self,
        draft: &PostDraft,
        address: &str,
    ) -> Result<TransactionId, LedgerError> {
        let id = self.queries.create_post(draft, address).await?;
        self.invalidate_feeds();
        self.invalidate(&QueryKey::UserPosts(address.to_string()));
        self.invalidate_labels(&draft.tags);
        info!("[ab-04] post published in {}", id);
        Ok(id)
    }

    // --------------------------------------------------------- subscription

    /// Observe an identity: the receiver yields `{status, value}` on every
    /// change, independent of any rendering technology.
    pub fn subscribe(&self, key: &QueryKey) -> watch::Receiver<QuerySnapshot> {
        self.slot(key).watch.subscribe()
    }

    /// Current snapshot of an identity without subscribing.
    pub fn snapshot(&self, key: &QueryKey) -> QuerySnapshot {
        self.slot(key).watch.borrow().clone()
    }

    /// Force the next read of an identity to refetch. The last known value
    /// stays visible to subscribers as `Stale`.
    pub fn invalidate(&self, key: &QueryKey) {
        let Some(slot) = self.slots.lock().get(key).cloned() else {
            // Never read: nothing cached, nothing to force.
            return;
        };
        let mut state = slot.state.lock();
        state.generation += 1;
        state.in_flight = false;
        state.fetched_at = None;
        state.error = None;
        state.status = if state.value.is_some() {
            QueryStatus::Stale
        } else {
            QueryStatus::Idle
        };
        debug!("[ab-04] invalidated {}", key);
        slot.publish(&state);
    }

    // ------------------------------------------------------------ internals

    fn slot(&self, key: &QueryKey) -> Arc<Slot> {
        self.slots
            .lock()
            .entry(key.clone())
            .or_insert_with(Slot::new)
            .clone()
    }

    fn invalidate_feeds(&self) {
        let feed_keys: Vec<QueryKey> = self
            .slots
            .lock()
            .keys()
            .filter(|key| matches!(key, QueryKey::Feed { .. }))
            .cloned()
            .collect();
        for key in feed_keys {
            self.invalidate(&key);
        }
    }

    fn invalidate_labels(&self, labels: &[String]) {
        let label_keys: Vec<QueryKey> = self
            .slots
            .lock()
            .keys()
            .filter(|key| {
                matches!(key, QueryKey::TagSearch(label)
                    if labels.iter().any(|l| l.trim() == label.as_str()))
            })
            .cloned()
            .collect();
        for key in label_keys {
            self.invalidate(&key);
        }
    }

    async fn read(&self, key: QueryKey) -> Result<CachedValue, LedgerError> {
        let slot = self.slot(&key);
        loop {
            let plan = {
                let mut state = slot.state.lock();
                if let (Some(value), Some(at)) = (&state.value, state.fetched_at) {
                    if at.elapsed() < self.config.stale_after(&key) || state.in_flight {
                        // Fresh, or a refresh is already running: either
                        // way the last known value serves without blocking
                        // on the round-trip.
                        Plan::Serve(value.clone())
                    } else {
                        let value = value.clone();
                        let generation = begin_fetch(&slot, &mut state);
                        Plan::Refresh { generation, value }
                    }
                } else if state.in_flight {
                    Plan::Wait(slot.watch.subscribe())
                } else {
                    let generation = begin_fetch(&slot, &mut state);
                    Plan::Fetch { generation }
                }
            };

            match plan {
                Plan::Serve(value) => return Ok(value),
                Plan::Wait(rx) => {
                    if let Some(value) = await_settled(rx).await? {
                        return Ok(value);
                    }
                    // Invalidated while in flight; take another pass.
                }
                Plan::Fetch { generation } => {
                    let rx = slot.watch.subscribe();
                    self.spawn_fetch(&slot, &key, generation);
                    if let Some(value) = await_settled(rx).await? {
                        return Ok(value);
                    }
                }
                Plan::Refresh { generation, value } => {
                    self.spawn_fetch(&slot, &key, generation);
                    return Ok(value);
                }
            }
        }
    }

    /// Run a fetch for `key` in a detached task. The slot's `in_flight`
    /// flag is only ever cleared by `commit` or `invalidate`, so the fetch
    /// must not ride on a caller's future: a reader dropped mid-read would
    /// otherwise leave the slot fetching forever.
    fn spawn_fetch(&self, slot: &Arc<Slot>, key: &QueryKey, generation: u64) {
        let queries = Arc::clone(&self.queries);
        let retries = self.config.max_read_retries;
        let slot = Arc::clone(slot);
        let key = key.clone();
        tokio::spawn(async move {
            let result = fetch_with_retry(&*queries, &key, retries).await;
            commit(&slot, generation, &result);
        });
    }
}

/// Wait for the in-flight fetch on a slot to settle. `Ok(None)` means the
/// slot was invalidated underneath the fetch; the caller should plan again.
async fn await_settled(
    mut rx: watch::Receiver<QuerySnapshot>,
) -> Result<Option<CachedValue>, LedgerError> {
    let outcome = rx
        .wait_for(|snapshot| snapshot.status != QueryStatus::Fetching)
        .await
        .map(|snapshot| snapshot.clone())
        .map_err(|_| LedgerError::NetworkFailure("cache slot dropped".to_string()))?;
    match outcome.status {
        QueryStatus::Fresh => Ok(outcome.value),
        QueryStatus::Error => Err(outcome
            .error
            .unwrap_or_else(|| LedgerError::NetworkFailure("fetch failed".to_string()))),
        _ => Ok(None),
    }
}

fn begin_fetch(slot: &Slot, state: &mut SlotState) -> u64 {
    state.in_flight = true;
    state.status = QueryStatus::Fetching;
    slot.publish(state);
    state.generation
}

/// Apply a completed fetch to its slot, unless the slot was invalidated
/// while the fetch was in flight.
fn commit(slot: &Slot, generation: u64, result: &Result<CachedValue, LedgerError>) {
    let mut state = slot.state.lock();
    if state.generation != generation {
        debug!(
            "[ab-04] discarding late completion (generation {} behind {})",
            generation, state.generation
        );
        return;
    }
    state.in_flight = false;
    match result {
        Ok(value) => {
            state.value = Some(value.clone());
            state.fetched_at = Some(Instant::now());
            state.error = None;
            state.status = QueryStatus::Fresh;
        }
        Err(e) => {
            state.error = Some(e.clone());
            state.fetched_at = None;
            state.status = QueryStatus::Error;
        }
    }
    slot.publish(&state);
}

async fn fetch_once(
    queries: &dyn BlogQueries,
    key: &QueryKey,
) -> Result<CachedValue, LedgerError> {
    match key {
        QueryKey::Profile(address) => {
            queries.find_profile(address).await.map(CachedValue::Profile)
        }
        QueryKey::Feed { limit } => queries.list_feed(*limit).await.map(CachedValue::Posts),
        QueryKey::UserPosts(address) => {
            queries.list_by_author(address).await.map(CachedValue::Posts)
        }
        QueryKey::TagSearch(label) => {
            queries.list_by_label(label).await.map(CachedValue::Posts)
        }
        QueryKey::Post(id) => queries.get_post(id).await.map(CachedValue::Post),
    }
}

async fn fetch_with_retry(
    queries: &dyn BlogQueries,
    key: &QueryKey,
    max_retries: u32,
) -> Result<CachedValue, LedgerError> {
    let mut attempt = 0u32;
    loop {
        match fetch_once(queries, key).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < max_retries => {
                let delay = retry_delay(attempt);
                warn!("[ab-04] read {} failed ({}), retrying in {:?}", key, e, delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

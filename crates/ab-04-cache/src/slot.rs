//! # Cache Slots
//!
//! One slot per query identity. The slot owns the state machine, the last
//! known value, and the watch channel observers subscribe to. Slots are
//! only ever mutated under their own lock by their own fetch/invalidate
//! sequence; there is no cross-identity locking.

use parking_lot::Mutex;
use shared_types::{LedgerError, Post, Profile};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Instant;

/// Lifecycle of a query identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing fetched yet.
    Idle,
    /// A fetch (initial or refresh) is in flight.
    Fetching,
    /// Value is current within its staleness window.
    Fresh,
    /// Value is served but the next access will refetch.
    Stale,
    /// The last fetch failed; `error` carries the cause.
    Error,
}

/// Value held by a slot, typed by identity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Profile(Option<Profile>),
    Posts(Vec<Post>),
    Post(Option<Post>),
}

/// What observers receive on every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    pub status: QueryStatus,
    /// Last known value, kept through refreshes and errors so consumers
    /// can keep rendering while a refetch runs.
    pub value: Option<CachedValue>,
    pub error: Option<LedgerError>,
}

impl QuerySnapshot {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            value: None,
            error: None,
        }
    }

    /// True while the identity has nothing to show yet (spinner state).
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Fetching && self.value.is_none()
    }
}

pub(crate) struct SlotState {
    pub status: QueryStatus,
    pub value: Option<CachedValue>,
    pub error: Option<LedgerError>,
    /// When the value was committed; `None` means the next read must
    /// refetch before serving.
    pub fetched_at: Option<Instant>,
    /// Bumped on invalidation; completions carrying an older generation
    /// are discarded.
    pub generation: u64,
    pub in_flight: bool,
}

pub(crate) struct Slot {
    pub(crate) watch: watch::Sender<QuerySnapshot>,
    pub(crate) state: Mutex<SlotState>,
}

impl Slot {
    pub(crate) fn new() -> Arc<Self> {
        let (watch, _) = watch::channel(QuerySnapshot::idle());
        Arc::new(Self {
            watch,
            state: Mutex::new(SlotState {
                status: QueryStatus::Idle,
                value: None,
                error: None,
                fetched_at: None,
                generation: 0,
                in_flight: false,
            }),
        })
    }

    /// Broadcast the current state to observers. Called with the state
    /// lock held so snapshots are published in mutation order.
    pub(crate) fn publish(&self, state: &SlotState) {
        self.watch.send_replace(QuerySnapshot {
            status: state.status,
            value: state.value.clone(),
            error: state.error.clone(),
        });
    }
}

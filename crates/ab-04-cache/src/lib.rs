//! # Client Cache & Mutation Layer (ab-04)
//!
//! Keeps UI state consistent with ledger reads and writes without owning a
//! database. Each logical read (one profile, one feed window, one post)
//! has a **query identity** backed by a cache slot with the state machine
//!
//! ```text
//! idle → fetching → fresh → stale → fetching(refresh) → fresh → …
//!                 ↘ error (reachable from any fetching state)
//! ```
//!
//! Discipline:
//!
//! - **stale-while-revalidate**: a stale slot serves its last known value
//!   immediately and refreshes in the background;
//! - **de-duplication**: concurrent reads of one identity share a single
//!   in-flight fetch; redundant index calls are rate-limited upstream, so
//!   this is a correctness requirement, not an optimization;
//! - **absent keys short-circuit**: a read bound to no address/id resolves
//!   to "absent" with zero network traffic;
//! - **liveness**: every asynchronous completion is guarded by a slot
//!   generation counter, so a late-arriving response never overwrites
//!   state that was invalidated while it was in flight. Fetches run in
//!   detached tasks, so a reader dropped mid-read (timeout, task abort)
//!   never leaves its slot stuck fetching;
//! - **invalidation**: successful mutations invalidate exactly the
//!   identities they could have staled: the address's profile for profile
//!   creation, the feed windows and the author's posts for post creation;
//! - **retry**: reads get at most one automatic retry with exponential
//!   backoff, and only for transport failures. Mutations are never
//!   retried.
//!
//! Observers subscribe to an identity and receive `{status, value}`
//! snapshots on change, decoupled from any rendering technology.

pub mod cache;
pub mod config;
pub mod keys;
pub mod retry;
pub mod slot;

pub use cache::BlogCache;
pub use config::CacheConfig;
pub use keys::QueryKey;
pub use slot::{CachedValue, QuerySnapshot, QueryStatus};

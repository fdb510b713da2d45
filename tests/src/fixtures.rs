//! Shared wiring for the end-to-end tests: a full stack over the in-memory
//! ledger, one wallet session, hand-driven clock.

use ab_01_ledger_gateway::{ManualClock, MemoryLedger, MemorySigner};
use ab_03_query::{QueryConfig, QueryService};
use ab_04_cache::{BlogCache, CacheConfig};
use std::sync::Arc;

pub struct Stack {
    pub ledger: Arc<MemoryLedger>,
    pub signer: Arc<MemorySigner>,
    pub clock: Arc<ManualClock>,
    pub cache: Arc<BlogCache>,
}

/// Full stack with a connected session for `address`.
pub fn stack_with_session(address: &str) -> Stack {
    let signer = Arc::new(MemorySigner::connected(address));
    build(signer)
}

/// Full stack with no wallet connected.
pub fn stack_without_session() -> Stack {
    build(Arc::new(MemorySigner::disconnected()))
}

fn build(signer: Arc<MemorySigner>) -> Stack {
    let ledger = Arc::new(MemoryLedger::new(signer.clone()));
    let clock = Arc::new(ManualClock::starting_at(1_700_000_000_000));
    let queries = Arc::new(QueryService::new(
        ledger.clone(),
        signer.clone(),
        clock.clone(),
        QueryConfig::for_testing(),
    ));
    let cache = Arc::new(BlogCache::new(queries, CacheConfig::for_testing()));
    Stack {
        ledger,
        signer,
        clock,
        cache,
    }
}

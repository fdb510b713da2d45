//! # Cache Configuration

use crate::keys::QueryKey;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Staleness windows and retry limits, per query-identity kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Window for identities without a dedicated setting (feed, label
    /// search), in milliseconds.
    pub default_stale_ms: u64,

    /// Profile reads.
    pub profile_stale_ms: u64,

    /// Single-post reads.
    pub post_stale_ms: u64,

    /// Per-author listings.
    pub user_posts_stale_ms: u64,

    /// Automatic retries for a failed read. Mutations are never retried.
    pub max_read_retries: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_stale_ms: 5 * 60 * 1_000,
            profile_stale_ms: 10 * 60 * 1_000,
            post_stale_ms: 10 * 60 * 1_000,
            user_posts_stale_ms: 10 * 60 * 1_000,
            max_read_retries: 1,
        }
    }
}

impl CacheConfig {
    /// Create a config for testing. Windows are long enough that values
    /// stay fresh for a whole test run; staleness tests shorten them
    /// explicitly.
    pub fn for_testing() -> Self {
        Self {
            default_stale_ms: 60_000,
            profile_stale_ms: 60_000,
            post_stale_ms: 60_000,
            user_posts_stale_ms: 60_000,
            max_read_retries: 1,
        }
    }

    /// Staleness window for an identity.
    pub fn stale_after(&self, key: &QueryKey) -> Duration {
        let millis = match key {
            QueryKey::Profile(_) => self.profile_stale_ms,
            QueryKey::Post(_) => self.post_stale_ms,
            QueryKey::UserPosts(_) => self.user_posts_stale_ms,
            QueryKey::Feed { .. } | QueryKey::TagSearch(_) => self.default_stale_ms,
        };
        Duration::from_millis(millis)
    }
}

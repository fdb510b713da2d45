//! # Query Layer Configuration

use serde::{Deserialize, Serialize};

/// Tunables for index windows and list resolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryConfig {
    /// How many index matches to consider when resolving a profile.
    /// Duplicate profiles are possible (the ledger enforces no
    /// uniqueness), so a small window is fetched and the lowest
    /// transaction id wins deterministically.
    pub profile_window: usize,

    /// Concurrent payload fetches while resolving a list of ids.
    pub fetch_fan_out: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            profile_window: 10,
            fetch_fan_out: 4,
        }
    }
}

impl QueryConfig {
    /// Create a config for testing (narrow fan-out).
    pub fn for_testing() -> Self {
        Self {
            profile_window: 10,
            fetch_fan_out: 2,
        }
    }
}

//! # Gateway Configuration

use serde::{Deserialize, Serialize};

/// Endpoints and limits for the HTTP gateway adapter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL for raw transaction bodies and submission
    /// (e.g. "https://arweave.net").
    pub gateway_url: String,

    /// Index query endpoint (e.g. "https://arweave.net/graphql").
    pub graphql_url: String,

    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateway_url: "https://arweave.net".to_string(),
            graphql_url: "https://arweave.net/graphql".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl GatewayConfig {
    /// Create a config for testing (local endpoints, short timeout).
    pub fn for_testing() -> Self {
        Self {
            gateway_url: "http://localhost:1984".to_string(),
            graphql_url: "http://localhost:1984/graphql".to_string(),
            timeout_ms: 1_000,
        }
    }
}

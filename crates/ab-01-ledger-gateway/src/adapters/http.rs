//! # HTTP Gateway Adapter
//!
//! Implements [`LedgerGateway`] against a real gateway host: the index is
//! queried over its GraphQL endpoint, payloads are fetched from the raw
//! transaction endpoint, and signed transactions are posted to `/tx`.

use crate::config::GatewayConfig;
use crate::domain::{TagFilter, TagPair, TransactionDraft};
use crate::ports::inbound::LedgerGateway;
use crate::ports::outbound::{SignError, WalletSigner};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{LedgerError, TransactionId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Index query: tag filters AND-ed together, OR within a filter's value
/// set, bounded by `first`. Only ids are selected; payloads are fetched
/// per-transaction afterwards.
const TRANSACTIONS_QUERY: &str = "\
query TransactionIds($tags: [TagFilter!], $first: Int) {
  transactions(tags: $tags, first: $first) {
    edges {
      node {
        id
      }
    }
  }
}";

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: QueryVariables<'a>,
}

#[derive(Serialize)]
struct QueryVariables<'a> {
    tags: &'a [TagFilter],
    /// Omitted entirely when the caller wants every match; the index
    /// treats a missing `first` as unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<i64>,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<TransactionsData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct TransactionsData {
    transactions: TransactionEdges,
}

#[derive(Deserialize)]
struct TransactionEdges {
    edges: Vec<TransactionEdge>,
}

#[derive(Deserialize)]
struct TransactionEdge {
    node: TransactionNode,
}

#[derive(Deserialize)]
struct TransactionNode {
    id: String,
}

/// HTTP-based ledger gateway.
pub struct HttpLedgerGateway {
    config: GatewayConfig,
    signer: Arc<dyn WalletSigner>,
    http: reqwest::Client,
}

impl HttpLedgerGateway {
    /// Create a gateway against the configured host, signing through the
    /// given wallet.
    pub fn new(config: GatewayConfig, signer: Arc<dyn WalletSigner>) -> Self {
        Self {
            config,
            signer,
            http: reqwest::Client::new(),
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms)
    }

    fn payload_url(&self, id: &TransactionId) -> String {
        format!("{}/{}", self.config.gateway_url.trim_end_matches('/'), id)
    }

    fn submit_url(&self) -> String {
        format!("{}/tx", self.config.gateway_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LedgerGateway for HttpLedgerGateway {
    async fn fetch_by_tags(
        &self,
        filters: &[TagFilter],
        limit: Option<usize>,
    ) -> Result<Vec<TransactionId>, LedgerError> {
        let body = GraphQlRequest {
            query: TRANSACTIONS_QUERY,
            variables: QueryVariables {
                tags: filters,
                first: limit.map(|n| n as i64),
            },
        };

        let response = self
            .http
            .post(&self.config.graphql_url)
            .timeout(self.timeout())
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::NetworkFailure(format!("index query: {}", e)))?;

        if !response.status().is_success() {
            return Err(LedgerError::NetworkFailure(format!(
                "index query returned {}",
                response.status()
            )));
        }

        let parsed: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::NetworkFailure(format!("index response: {}", e)))?;

        if let Some(errors) = parsed.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(LedgerError::NetworkFailure(format!("index error: {}", message)));
        }

        let ids: Vec<TransactionId> = parsed
            .data
            .map(|d| d.transactions.edges.into_iter().map(|e| e.node.id).collect())
            .unwrap_or_default();

        debug!("[ab-01] index query matched {} transaction(s)", ids.len());
        Ok(ids)
    }

    async fn fetch_payload(&self, id: &TransactionId) -> Result<Vec<u8>, LedgerError> {
        let response = self
            .http
            .get(self.payload_url(id))
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| LedgerError::NetworkFailure(format!("payload fetch {}: {}", id, e)))?;

        let status = response.status();
        // 202 means the ledger knows the id but has not confirmed the data
        // yet; for readers that is indistinguishable from absent.
        if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::GONE
            || status == reqwest::StatusCode::ACCEPTED
        {
            return Err(LedgerError::NotFound(id.clone()));
        }
        if !status.is_success() {
            return Err(LedgerError::NetworkFailure(format!(
                "payload fetch {} returned {}",
                id, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LedgerError::NetworkFailure(format!("payload body {}: {}", id, e)))?;
        Ok(bytes.to_vec())
    }

    async fn submit(
        &self,
        data: Vec<u8>,
        tags: Vec<TagPair>,
    ) -> Result<TransactionId, LedgerError> {
        if self.signer.active_address().is_none() {
            warn!("[ab-01] submit attempted without a connected signer");
            return Err(LedgerError::NoSignerAvailable);
        }

        let draft = TransactionDraft { data, tags };
        let signed = self.signer.sign(&draft).await.map_err(|e| match e {
            SignError::NoSession => LedgerError::NoSignerAvailable,
            SignError::Rejected => LedgerError::SigningRejected,
        })?;

        let response = self
            .http
            .post(self.submit_url())
            .timeout(self.timeout())
            .json(&signed.body)
            .send()
            .await
            .map_err(|e| LedgerError::SubmissionFailed(format!("post: {}", e)))?;

        if !response.status().is_success() {
            return Err(LedgerError::SubmissionFailed(format!(
                "ledger returned {}",
                response.status()
            )));
        }

        debug!("[ab-01] submitted transaction {}", signed.id);
        Ok(signed.id)
    }
}

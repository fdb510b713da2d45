//! # Query Service
//!
//! The read/write orchestration over the gateway. Failure policy:
//!
//! - singular lookups (`find_profile`, `get_post`) return `Ok(None)` for
//!   absent or unreadable records; only a transport failure propagates, so
//!   callers can tell "truly missing" from "could not check";
//! - list lookups resolve ids with bounded parallel fan-out and skip
//!   failed items with a warning, never failing the whole list;
//! - writes validate first, check the signer precondition, and propagate
//!   every failure.

use crate::config::QueryConfig;
use crate::filters;
use ab_01_ledger_gateway::{Clock, LedgerGateway, WalletSigner};
use ab_02_entity_codec::{decode_post, decode_profile, encode_post, encode_profile, tags};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use shared_types::{
    require_address, validate_post_draft, validate_profile_draft, LedgerError, Post, PostDraft,
    Profile, ProfileDraft, TransactionId,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Display-name fallback when the publishing address has no profile yet.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Object-safe query surface consumed by the cache layer.
#[async_trait]
pub trait BlogQueries: Send + Sync {
    async fn find_profile(&self, address: &str) -> Result<Option<Profile>, LedgerError>;
    async fn list_feed(&self, limit: usize) -> Result<Vec<Post>, LedgerError>;
    async fn list_by_author(&self, address: &str) -> Result<Vec<Post>, LedgerError>;
    async fn list_by_label(&self, label: &str) -> Result<Vec<Post>, LedgerError>;
    async fn get_post(&self, id: &str) -> Result<Option<Post>, LedgerError>;
    async fn create_profile(
        &self,
        draft: &ProfileDraft,
        address: &str,
    ) -> Result<TransactionId, LedgerError>;
    async fn create_post(
        &self,
        draft: &PostDraft,
        address: &str,
    ) -> Result<TransactionId, LedgerError>;
}

/// Production [`BlogQueries`] over a [`LedgerGateway`].
///
/// Session state is passed in explicitly (the signer reference), never read
/// from ambient globals.
pub struct QueryService {
    gateway: Arc<dyn LedgerGateway>,
    signer: Arc<dyn WalletSigner>,
    clock: Arc<dyn Clock>,
    config: QueryConfig,
}

impl QueryService {
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        signer: Arc<dyn WalletSigner>,
        clock: Arc<dyn Clock>,
        config: QueryConfig,
    ) -> Self {
        Self {
            gateway,
            signer,
            clock,
            config,
        }
    }

    /// Resolve a list of transaction ids to decoded posts, newest first.
    ///
    /// Each fetch is independent and failure-isolated: an unreadable or
    /// unreachable item is skipped with a warning and the others survive.
    /// Sorting is client-side because the index guarantees no temporal
    /// order.
    async fn resolve_posts(&self, ids: Vec<TransactionId>) -> Vec<Post> {
        let mut posts: Vec<Post> = stream::iter(ids)
            .map(|id| self.fetch_post(id))
            .buffer_unordered(self.config.fetch_fan_out.max(1))
            .filter_map(|post| async move { post })
            .collect()
            .await;
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts
    }

    async fn fetch_post(&self, id: TransactionId) -> Option<Post> {
        let payload = match self.gateway.fetch_payload(&id).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("[ab-03] skipping post {}: {}", id, e);
                return None;
            }
        };
        match decode_post(&payload, id.clone()) {
            Ok(post) => Some(post),
            Err(e) => {
                warn!("[ab-03] skipping post {}: {}", id, e);
                None
            }
        }
    }

    /// Writes require a connected session before anything touches the
    /// network.
    fn require_signer(&self) -> Result<(), LedgerError> {
        if self.signer.active_address().is_none() {
            return Err(LedgerError::NoSignerAvailable);
        }
        Ok(())
    }
}

/// Display label for an author: their profile name when one exists, a
/// shortened address otherwise. Read-side counterpart of the frozen
/// `author_name` snapshot.
pub fn author_label(profile: Option<&Profile>, address: &str) -> String {
    match profile {
        Some(profile) => profile.name.clone(),
        None => shared_types::shorten_address(address),
    }
}

fn format_join_date(millis: u64) -> String {
    chrono::DateTime::from_timestamp_millis(millis as i64)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

#[async_trait]
impl BlogQueries for QueryService {
    async fn find_profile(&self, address: &str) -> Result<Option<Profile>, LedgerError> {
        if address.trim().is_empty() {
            return Ok(None);
        }

        let ids = self
            .gateway
            .fetch_by_tags(&filters::profile_filters(address), Some(self.config.profile_window))
            .await?;

        // The ledger enforces no one-profile-per-address rule, so duplicate
        // records are possible. The lowest transaction id wins: stable
        // across index re-orderings, which the index never guarantees.
        let Some(id) = ids.into_iter().min() else {
            debug!("[ab-03] no profile for {}", address);
            return Ok(None);
        };

        let payload = match self.gateway.fetch_payload(&id).await {
            Ok(payload) => payload,
            Err(e @ LedgerError::NetworkFailure(_)) => return Err(e),
            Err(e) => {
                warn!("[ab-03] profile {} for {} unreadable: {}", id, address, e);
                return Ok(None);
            }
        };

        match decode_profile(&payload) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("[ab-03] profile {} for {} undecodable: {}", id, address, e);
                Ok(None)
            }
        }
    }

    async fn list_feed(&self, limit: usize) -> Result<Vec<Post>, LedgerError> {
        let ids = self
            .gateway
            .fetch_by_tags(&filters::post_filters(), Some(limit))
            .await?;
        Ok(self.resolve_posts(ids).await)
    }

    async fn list_by_author(&self, address: &str) -> Result<Vec<Post>, LedgerError> {
        let ids = self
            .gateway
            .fetch_by_tags(&filters::author_filters(address), None)
            .await?;
        Ok(self.resolve_posts(ids).await)
    }

    async fn list_by_label(&self, label: &str) -> Result<Vec<Post>, LedgerError> {
        let ids = self
            .gateway
            .fetch_by_tags(&filters::label_filters(label), None)
            .await?;
        Ok(self.resolve_posts(ids).await)
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, LedgerError> {
        let id = id.to_string();
        let payload = match self.gateway.fetch_payload(&id).await {
            Ok(payload) => payload,
            Err(e @ LedgerError::NetworkFailure(_)) => return Err(e),
            Err(e) => {
                debug!("[ab-03] post {} absent: {}", id, e);
                return Ok(None);
            }
        };
        match decode_post(&payload, id.clone()) {
            Ok(post) => Ok(Some(post)),
            Err(e) => {
                warn!("[ab-03] post {} undecodable: {}", id, e);
                Ok(None)
            }
        }
    }

    async fn create_profile(
        &self,
        draft: &ProfileDraft,
        address: &str,
    ) -> Result<TransactionId, LedgerError> {
        require_address(address)?;
        validate_profile_draft(draft)?;
        self.require_signer()?;

        let mut draft = draft.clone();
        if draft.join_date.trim().is_empty() {
            draft.join_date = format_join_date(self.clock.now_millis());
        }

        let payload = encode_profile(&draft, &address.to_string())?;
        let id = self.gateway.submit(payload, tags::profile_tags(address)).await?;
        info!("[ab-03] profile for {} created in {}", address, id);
        Ok(id)
    }

    async fn create_post(
        &self,
        draft: &PostDraft,
        address: &str,
    ) -> Result<TransactionId, LedgerError> {
        require_address(address)?;
        validate_post_draft(draft)?;
        self.require_signer()?;

        // Snapshot the author's display name at publish time. The lookup
        // may degrade (no profile yet, index unreachable); publishing must
        // still go through with the fallback label.
        let author_name = match self.find_profile(address).await {
            Ok(Some(profile)) => profile.name,
            Ok(None) => ANONYMOUS_AUTHOR.to_string(),
            Err(e) => {
                warn!(
                    "[ab-03] profile lookup before publish failed, using fallback: {}",
                    e
                );
                ANONYMOUS_AUTHOR.to_string()
            }
        };

        let timestamp = self.clock.now_millis();
        let payload = encode_post(draft, &address.to_string(), &author_name, timestamp)?;
        let id = self
            .gateway
            .submit(payload, tags::post_tags(address, &draft.tags))
            .await?;
        info!("[ab-03] post by {} published in {}", address, id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_date_format_is_human_readable() {
        // 2023-11-14T22:13:20Z
        assert_eq!(format_join_date(1_700_000_000_000), "November 14, 2023");
    }

    #[test]
    fn test_author_label_falls_back_to_shortened_address() {
        let profile = Profile {
            name: "Ada".to_string(),
            bio: String::new(),
            address: "abc".to_string(),
            join_date: String::new(),
        };
        assert_eq!(author_label(Some(&profile), "ignored"), "Ada");
        assert_eq!(
            author_label(None, "k2tP7yGBvHWkJcJMXi4oYBuDvVfGw1C3rE9pQsZn0aUm"),
            "k2tP7...0aUm"
        );
    }
}

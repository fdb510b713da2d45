//! # Post Codec
//!
//! The post payload carries everything except the transaction id, which is
//! content-derived and only known after submission; decode injects it from
//! the transaction identifier.

use serde::{Deserialize, Serialize};
use shared_types::{Address, LedgerError, Post, PostDraft, TransactionId};

/// Wire form of a post payload. Field names are part of the ledger
/// contract; the id is deliberately absent.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostPayload {
    title: String,
    description: String,
    content: String,
    tags: Vec<String>,
    author: String,
    author_name: String,
    timestamp: u64,
}

/// Encode a post draft with its stamped authorship fields into the JSON
/// payload stored on the ledger. `author_name` is the display-name
/// snapshot frozen at publish time.
pub fn encode_post(
    draft: &PostDraft,
    author: &Address,
    author_name: &str,
    timestamp: u64,
) -> Result<Vec<u8>, LedgerError> {
    let payload = PostPayload {
        title: draft.title.clone(),
        description: draft.description.clone(),
        content: draft.content.clone(),
        tags: draft.tags.clone(),
        author: author.clone(),
        author_name: author_name.to_string(),
        timestamp,
    };
    serde_json::to_vec(&payload)
        .map_err(|e| LedgerError::MalformedPayload(format!("post encode: {}", e)))
}

/// Decode a post payload, injecting the transaction id it was read from.
pub fn decode_post(payload: &[u8], id: TransactionId) -> Result<Post, LedgerError> {
    let wire: PostPayload = serde_json::from_slice(payload)
        .map_err(|e| LedgerError::MalformedPayload(format!("post decode {}: {}", id, e)))?;
    Ok(Post {
        id,
        title: wire.title,
        description: wire.description,
        content: wire.content,
        tags: wire.tags,
        author: wire.author,
        author_name: wire.author_name,
        timestamp: wire.timestamp,
    })
}

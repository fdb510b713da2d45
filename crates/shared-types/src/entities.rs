//! # Domain Entities
//!
//! The two durable entities of the platform, plus the draft types callers
//! fill in before a write. Both entities live on the ledger as JSON payloads
//! with camelCase field names; the serde renames here are part of the wire
//! contract and must not change.

use serde::{Deserialize, Serialize};

/// Ledger account identifier (opaque, globally unique).
pub type Address = String;

/// Transaction identifier, assigned by the ledger at submission.
pub type TransactionId = String;

/// A user profile as stored on the ledger.
///
/// At most one profile is expected per address, but the ledger enforces no
/// uniqueness; duplicate resolution happens in the query layer. The
/// `join_date` is stamped once at creation and has no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Owning account; also the ledger-level signer of the profile record.
    pub address: Address,
    /// Display name. Required, non-empty.
    pub name: String,
    /// Human-readable date string, immutable after creation.
    pub join_date: String,
    /// Free text, at most [`crate::MAX_BIO_LEN`] characters.
    pub bio: String,
}

/// Fields the user supplies when creating a profile.
///
/// The owning address is attached at encode time and the join date is
/// stamped by the query layer when left empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: String,
    /// Leave empty to have the creation path stamp the current date.
    pub join_date: String,
}

/// A published blog post.
///
/// Immutable once submitted. `author_name` is a snapshot of the author's
/// profile name at publish time; later profile edits do not retroactively
/// update past posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Ledger transaction id; assigned only after successful submission.
    pub id: TransactionId,
    pub title: String,
    pub description: String,
    pub content: String,
    /// Address of the signer who submitted the post.
    pub author: Address,
    /// Display name of the author, frozen at publish time.
    pub author_name: String,
    /// Client-clock milliseconds at submission; used purely for ordering.
    pub timestamp: u64,
    /// User-supplied labels, each also attached as a discovery tag.
    pub tags: Vec<String>,
}

/// Fields the user supplies when composing a post. Author identity and the
/// timestamp are stamped by the creation path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Shorten an address for display (`abc12...wxyz`).
///
/// Used as the fallback author label when an address has no discoverable
/// profile.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

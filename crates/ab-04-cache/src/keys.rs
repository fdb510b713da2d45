//! # Query Identities
//!
//! The cache key space. Identities are logical, not transport-level: a
//! feed window of ten and a feed window of twenty are different reads with
//! independent slots.

use shared_types::{Address, TransactionId};
use std::fmt;

/// Identity of one logical read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// A single address's profile.
    Profile(Address),
    /// The global feed, bounded to a window.
    Feed { limit: usize },
    /// A single post by transaction id.
    Post(TransactionId),
    /// Every post by one author.
    UserPosts(Address),
    /// Posts carrying a user label.
    TagSearch(String),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile(address) => write!(f, "profile:{}", address),
            Self::Feed { limit } => write!(f, "feed:{}", limit),
            Self::Post(id) => write!(f, "post:{}", id),
            Self::UserPosts(address) => write!(f, "userPosts:{}", address),
            Self::TagSearch(label) => write!(f, "tagSearch:{}", label),
        }
    }
}

//! # Discovery Tag Vocabulary
//!
//! Fixed, case-sensitive, exact-match at the index. The attachment order
//! is part of the wire contract: Content-Type first, then App-Name, Type,
//! the owner tag, and for posts one `Post-Tag` per user label.

use ab_01_ledger_gateway::TagPair;

/// Identifies this application's transactions among all ledger traffic.
pub const APP_NAME: &str = "AR-Blog-App";

/// `Type` tag value for profile records.
pub const TYPE_PROFILE: &str = "AR-Blog-Profile";

/// `Type` tag value for post records.
pub const TYPE_POST: &str = "AR-Blog-Post";

pub const TAG_APP_NAME: &str = "App-Name";
pub const TAG_TYPE: &str = "Type";
/// Owning account of a profile record; the existence-lookup key.
pub const TAG_ADDRESS: &str = "Address";
/// Publishing account of a post record; the per-author listing key.
pub const TAG_AUTHOR: &str = "Author";
/// One instance per user-supplied label, for label-based discovery.
pub const TAG_POST_TAG: &str = "Post-Tag";
pub const TAG_CONTENT_TYPE: &str = "Content-Type";

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Ordered tag list for a profile write.
pub fn profile_tags(address: &str) -> Vec<TagPair> {
    vec![
        TagPair::new(TAG_CONTENT_TYPE, CONTENT_TYPE_JSON),
        TagPair::new(TAG_APP_NAME, APP_NAME),
        TagPair::new(TAG_TYPE, TYPE_PROFILE),
        TagPair::new(TAG_ADDRESS, address),
    ]
}

/// Ordered tag list for a post write. Labels are trimmed and attached one
/// `Post-Tag` each, in the order the author gave them; empty labels are
/// dropped.
pub fn post_tags(author: &str, labels: &[String]) -> Vec<TagPair> {
    let mut tags = vec![
        TagPair::new(TAG_CONTENT_TYPE, CONTENT_TYPE_JSON),
        TagPair::new(TAG_APP_NAME, APP_NAME),
        TagPair::new(TAG_TYPE, TYPE_POST),
        TagPair::new(TAG_AUTHOR, author),
    ];
    for label in labels {
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            tags.push(TagPair::new(TAG_POST_TAG, trimmed));
        }
    }
    tags
}

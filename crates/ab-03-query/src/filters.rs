//! # Read-Side Filter Builders
//!
//! One builder per query pattern the application needs. Every pattern here
//! has a matching write-side tag in the codec's vocabulary; the index
//! cannot answer anything else.

use ab_01_ledger_gateway::TagFilter;
use ab_02_entity_codec::tags;

/// Existence lookup: the profile record owned by `address`.
pub fn profile_filters(address: &str) -> Vec<TagFilter> {
    vec![
        TagFilter::exact(tags::TAG_APP_NAME, tags::APP_NAME),
        TagFilter::exact(tags::TAG_TYPE, tags::TYPE_PROFILE),
        TagFilter::exact(tags::TAG_ADDRESS, address),
    ]
}

/// Global feed: every post record of the application.
pub fn post_filters() -> Vec<TagFilter> {
    vec![
        TagFilter::exact(tags::TAG_APP_NAME, tags::APP_NAME),
        TagFilter::exact(tags::TAG_TYPE, tags::TYPE_POST),
    ]
}

/// Per-author listing.
pub fn author_filters(address: &str) -> Vec<TagFilter> {
    let mut filters = post_filters();
    filters.push(TagFilter::exact(tags::TAG_AUTHOR, address));
    filters
}

/// Label-based discovery over the per-label `Post-Tag` instances.
pub fn label_filters(label: &str) -> Vec<TagFilter> {
    let mut filters = post_filters();
    filters.push(TagFilter::exact(tags::TAG_POST_TAG, label.trim()));
    filters
}

//! # Gateway Value Types
//!
//! Tags are the only index the ledger offers: every query pattern the
//! application needs must have a corresponding tag chosen at write time.
//! Names and values are case-sensitive and matched exactly by the index.

use serde::{Deserialize, Serialize};
use shared_types::TransactionId;

/// A name/value pair attached to a transaction at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPair {
    pub name: String,
    pub value: String,
}

impl TagPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A read-side filter: matches transactions carrying a tag with this name
/// and any of these values. Filters combine with logical AND; values within
/// one filter with logical OR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    pub name: String,
    pub values: Vec<String>,
}

impl TagFilter {
    /// Single-value filter, the common case.
    pub fn exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }
}

/// An unsigned transaction: opaque payload plus the ordered tag list that
/// will be attached verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub data: Vec<u8>,
    pub tags: Vec<TagPair>,
}

/// A transaction after the external wallet has signed it. The id is
/// content-derived and assigned during signing; `body` is the wire form
/// posted to the ledger as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub id: TransactionId,
    pub body: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filter_serializes_to_index_shape() {
        let filter = TagFilter::exact("App-Name", "AR-Blog-App");
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["name"], "App-Name");
        assert_eq!(json["values"][0], "AR-Blog-App");
    }
}

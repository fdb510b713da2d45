//! # Domain Module
//!
//! Value types for the gateway: tags, tag filters, and transaction drafts.

pub mod types;

pub use types::*;

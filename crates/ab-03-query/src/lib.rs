//! # Query Layer (ab-03)
//!
//! Resolves application-level reads and writes onto the gateway's
//! tag/transaction model:
//!
//! - **Reads**: build the tag filters for a lookup, ask the index for
//!   matching ids, then resolve each id to a decoded entity. Singular
//!   lookups degrade to "absent" on anything but a transport failure; list
//!   lookups skip unreadable items instead of failing the whole list.
//! - **Writes**: validate the draft before any network traffic, stamp the
//!   authorship fields (display-name snapshot, client-clock timestamp,
//!   join date), then encode, tag, and submit through the gateway. Write
//!   failures always propagate.
//!
//! The [`BlogQueries`] trait is the object-safe surface the cache layer
//! (ab-04) consumes; [`QueryService`] is its production implementation.

pub mod config;
pub mod filters;
pub mod service;

pub use config::QueryConfig;
pub use filters::{author_filters, label_filters, post_filters, profile_filters};
pub use service::{author_label, BlogQueries, QueryService, ANONYMOUS_AUTHOR};

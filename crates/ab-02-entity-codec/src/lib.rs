//! # Entity Codec (ab-02)
//!
//! Maps the two domain entities onto the ledger's opaque-payload +
//! key/value-tag transaction shape:
//!
//! - payloads are JSON with camelCase field names (see `shared-types` for
//!   the entity derives); a post's transaction id is never stored inside
//!   the payload, it is injected after decode;
//! - the [`tags`] module defines the fixed, case-sensitive tag vocabulary
//!   that makes records discoverable. Tags are the only index the ledger
//!   offers, so every query pattern needs its tag chosen at write time;
//!   there is no retroactive indexing.
//!
//! Decoding has no schema versioning: any shape drift is an unrecoverable
//! read failure for that record, surfaced as
//! [`shared_types::LedgerError::MalformedPayload`].

pub mod post;
pub mod profile;
pub mod tags;

pub use post::{decode_post, encode_post};
pub use profile::{decode_profile, encode_profile};
pub use tags::*;

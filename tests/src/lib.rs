//! # arblog Test Suite
//!
//! End-to-end flows across the whole stack: in-memory ledger → gateway
//! port → query layer → cache layer. Per-crate behavior lives with each
//! crate; this suite covers what only the full wiring can show.

pub mod fixtures;
pub mod integration;

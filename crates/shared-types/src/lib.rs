//! # Shared Types Crate
//!
//! This crate contains the domain entities shared by every arblog crate:
//! the `Profile` and `Post` entities as they exist on the ledger, the draft
//! types callers fill in before a write, client-side validation rules, and
//! the `LedgerError` taxonomy every layer speaks.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: all cross-crate types are defined here.
//! - **Advisory Integrity**: the ledger enforces nothing about entity shape;
//!   every rule in [`validation`] is client-side and must run before any
//!   network call.
//! - **No Ambient State**: there is no global session. The connected address
//!   is passed explicitly wherever it is needed.

pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use validation::*;

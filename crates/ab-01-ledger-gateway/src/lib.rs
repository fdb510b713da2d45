//! # Ledger Transaction Gateway (ab-01)
//!
//! The gateway is the only crate that talks to the ledger network. It is a
//! thin adapter with three operations and no local persistence:
//!
//! - **fetch_by_tags**: ask the external index for transaction ids matching
//!   a set of tag filters (AND across filters, OR within a filter's value
//!   set, no ordering guarantee);
//! - **fetch_payload**: retrieve a transaction's opaque body;
//! - **submit**: build a transaction from a payload plus an ordered tag
//!   list, have the external wallet sign it, and post it to the ledger.
//!
//! ## Failure Policy
//!
//! Every operation surfaces failures to the caller as [`LedgerError`];
//! there are no retries at this layer. Retry policy belongs to the cache
//! layer (ab-04), which knows which reads are safe to repeat.
//!
//! ## Signing
//!
//! Key material is never held here. Signing goes through the
//! [`WalletSigner`] outbound port, which models the connected browser
//! wallet: "is a session present" and "sign this draft".
//!
//! ## Hexagonal Layout
//!
//! - **Domain** (`domain/`): tag and transaction value types, no I/O
//! - **Ports** (`ports/`): the `LedgerGateway` API and the `WalletSigner` /
//!   `Clock` SPIs
//! - **Adapters** (`adapters/`): HTTP implementation against a real
//!   gateway host, plus an in-memory ledger for tests

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{HttpLedgerGateway, ManualClock, MemoryLedger, MemorySigner, SystemClock};
pub use config::GatewayConfig;
pub use domain::{SignedTransaction, TagFilter, TagPair, TransactionDraft};
pub use ports::{Clock, LedgerGateway, SignError, WalletSigner};

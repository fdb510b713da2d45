//! # Ports Module
//!
//! Inbound API (what the query layer drives) and outbound SPIs (what the
//! gateway needs from the environment).

pub mod inbound;
pub mod outbound;

pub use inbound::LedgerGateway;
pub use outbound::{Clock, SignError, WalletSigner};

//! # Adapters Module
//!
//! Concrete implementations of the gateway port and its SPIs.

pub mod clock;
pub mod http;
pub mod memory;

pub use clock::{ManualClock, SystemClock};
pub use http::HttpLedgerGateway;
pub use memory::{MemoryLedger, MemorySigner};

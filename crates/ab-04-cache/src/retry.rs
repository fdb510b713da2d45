//! # Read Retry Backoff
//!
//! Exponential, base one second, doubling per attempt, capped at thirty
//! seconds. Applies to reads only; resubmitting a ledger write could
//! create a duplicate record.

use std::time::Duration;

pub(crate) fn retry_delay(attempt: u32) -> Duration {
    let millis = 1_000u64 << attempt.min(15);
    Duration::from_millis(millis.min(30_000))
}

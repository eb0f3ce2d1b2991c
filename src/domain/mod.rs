pub mod account;
pub mod address;
pub mod event;
pub mod loan;
pub mod operation;
pub mod ports;

/// Smallest-unit scale: one whole token is 10^18 units (wei-equivalent).
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Seconds since epoch, supplied by the caller. The core never reads a clock.
pub type Timestamp = u64;

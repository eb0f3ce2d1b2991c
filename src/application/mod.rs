//! Application services: the account ledger, the lending engine layered on
//! top of it, and the operation processor driving both from the boundary.

pub mod ledger;
pub mod lending;
pub mod processor;

use crate::domain::address::Address;
use crate::domain::{Timestamp, UNIT};
use serde::{Deserialize, Serialize};

/// Cumulative principal across borrows must stay strictly below this.
pub const MAX_BORROW_AMOUNT: u128 = 100 * UNIT;

/// Interest rate applied to every loan at creation, in basis points.
pub const INTEREST_RATE_BPS: u64 = 500;

/// Fixed loan term. Each successive borrow resets the due date to a fresh
/// window from the latest borrow; terms are never extended proportionally.
pub const LOAN_TERM_SECS: u64 = 30 * 86_400;

/// Flat fee added to the amount due once the due date has passed.
pub const DUE_DAY_PASSED_FEE: u128 = UNIT / 10;

pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// The aggregate loan record for one borrower. At most one exists per
/// borrower; repayment zeroes it rather than deleting it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Loan {
    pub borrower: Address,
    pub principal: u128,
    pub rate_bps: u64,
    pub borrowed_at: Timestamp,
    pub due_at: Timestamp,
}

impl Loan {
    /// The zeroed record standing for "no loan".
    pub fn none(borrower: Address) -> Self {
        Self {
            borrower,
            principal: 0,
            rate_bps: 0,
            borrowed_at: 0,
            due_at: 0,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.principal > 0
    }

    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.is_outstanding() && now > self.due_at
    }

    /// Simple pro-rated interest with integer floor division:
    /// `principal * rate_bps * elapsed / (10_000 * seconds_per_year)`.
    ///
    /// Truncation toward zero is deliberate; callers must tolerate it. No
    /// floating point anywhere, so test vectors stay bit-for-bit stable.
    /// `now` is caller-supplied and unbounded, so the product is computed
    /// with checked arithmetic; `None` means it left the `u128` range.
    pub fn accrued_interest(&self, now: Timestamp) -> Option<u128> {
        if self.principal == 0 || now <= self.borrowed_at {
            return Some(0);
        }
        let elapsed = (now - self.borrowed_at) as u128;
        self.principal
            .checked_mul(self.rate_bps as u128)?
            .checked_mul(elapsed)?
            .checked_div(10_000 * SECONDS_PER_YEAR as u128)
    }

    /// Principal plus interest accrued up to `now`. Payback settles exactly
    /// this amount in one call; there is no partial amortization.
    pub fn amount_due(&self, now: Timestamp) -> Option<u128> {
        self.principal.checked_add(self.accrued_interest(now)?)
    }

    /// Full-repayment reset: principal, rate and both timestamps go to zero.
    pub fn clear(&mut self) {
        self.principal = 0;
        self.rate_bps = 0;
        self.borrowed_at = 0;
        self.due_at = 0;
    }
}

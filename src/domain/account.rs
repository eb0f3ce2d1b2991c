use crate::domain::address::Address;
use crate::domain::UNIT;
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// An account must be opened with at least this much value.
pub const MINIMUM_CREATION_BALANCE: u128 = UNIT;

/// Fee a frozen account's owner pays to reactivate it.
pub const ACTIVATION_FEE: u128 = UNIT;

/// A single ledger entry: balance in smallest units plus the active flag
/// that gates deposit/withdraw/transfer/borrow eligibility.
///
/// The balance is a bookkeeping number, distinct from the custodied pool:
/// once loans are outstanding the sum of balances no longer matches the
/// pool's total.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    pub owner: Address,
    pub balance: u128,
    pub active: bool,
}

impl Account {
    /// Opens a new account with the initial deposit, active by default.
    pub fn open(owner: Address, deposit: u128) -> Self {
        Self {
            owner,
            balance: deposit,
            active: true,
        }
    }

    /// A placeholder entry for an address that never went through account
    /// creation: zero balance, inactive. Transfers can target it.
    pub fn passive(owner: Address) -> Self {
        Self {
            owner,
            balance: 0,
            active: false,
        }
    }

    pub fn credit(&mut self, amount: u128) {
        self.balance += amount;
    }

    pub fn debit(&mut self, amount: u128) -> Result<()> {
        if self.balance < amount {
            return Err(LedgerError::InsufficientBalance);
        }
        self.balance -= amount;
        Ok(())
    }
}

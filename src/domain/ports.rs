use super::account::Account;
use super::address::Address;
use super::loan::Loan;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn store(&self, account: Account) -> Result<()>;
    async fn get(&self, owner: Address) -> Result<Option<Account>>;
    async fn get_all(&self) -> Result<Vec<Account>>;
}

#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn store(&self, loan: Loan) -> Result<()>;
    async fn get(&self, borrower: Address) -> Result<Option<Loan>>;
    async fn get_all(&self) -> Result<Vec<Loan>>;
}

/// The abstract boundary to external value: a custodied pool plus per-address
/// external wallets. Transfers are synchronous success/fail with no retry
/// semantics; `false` means the transfer was refused and nothing moved.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Total value currently custodied by the pool.
    async fn custodied(&self) -> u128;

    /// Balance of an external wallet, outside the ledger's bookkeeping.
    async fn wallet_balance(&self, owner: Address) -> u128;

    /// Seeds an external wallet with value originating outside the system.
    async fn fund(&self, owner: Address, amount: u128);

    /// Moves value from an external wallet into the pool.
    async fn pay_in(&self, from: Address, amount: u128) -> bool;

    /// Moves value from the pool out to an external wallet.
    async fn pay_out(&self, to: Address, amount: u128) -> bool;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type LoanStoreBox = Box<dyn LoanStore>;

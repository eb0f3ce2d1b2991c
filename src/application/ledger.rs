use crate::domain::account::{Account, ACTIVATION_FEE, MINIMUM_CREATION_BALANCE};
use crate::domain::address::Address;
use crate::domain::event::{EventLog, LedgerEvent};
use crate::domain::ports::{AccountStoreBox, Vault};
use crate::domain::Timestamp;
use crate::error::{LedgerError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The component of record for balances and active status.
///
/// Every mutating operation is all-or-nothing: state is staged on a copy and
/// only stored once every check and external transfer has succeeded, and a
/// mutex serializes mutations so interleavings cannot observe partial state.
/// The custodied pool lives behind the [`Vault`] port; balance entries are
/// bookkeeping numbers that diverge from the pool once loans are outstanding.
pub struct AccountLedger {
    accounts: AccountStoreBox,
    vault: Arc<dyn Vault>,
    events: EventLog,
    admin: Address,
    op_lock: Mutex<()>,
}

impl AccountLedger {
    /// The admin capability is fixed at construction; there is no runtime
    /// role-granting step.
    pub fn new(
        accounts: AccountStoreBox,
        vault: Arc<dyn Vault>,
        events: EventLog,
        admin: Address,
    ) -> Self {
        Self {
            accounts,
            vault,
            events,
            admin,
            op_lock: Mutex::new(()),
        }
    }

    fn require_admin(&self, acting: Address) -> Result<()> {
        if acting != self.admin {
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }

    fn require_address(owner: Address) -> Result<()> {
        if owner.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        Ok(())
    }

    /// Opens an account exactly once, with the initial deposit paid into the
    /// custodied pool.
    pub async fn create_account(
        &self,
        owner: Address,
        deposit: u128,
        now: Timestamp,
    ) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        Self::require_address(owner)?;
        if self.accounts.get(owner).await?.is_some() {
            return Err(LedgerError::AccountAlreadyExists);
        }
        if deposit < MINIMUM_CREATION_BALANCE {
            return Err(LedgerError::DepositBelowMinimum);
        }
        if !self.vault.pay_in(owner, deposit).await {
            return Err(LedgerError::TransferFailed);
        }
        self.accounts.store(Account::open(owner, deposit)).await?;
        self.events
            .record(LedgerEvent::AccountCreated {
                owner,
                deposit,
                at: now,
            })
            .await;
        Ok(())
    }

    pub async fn deposit(&self, owner: Address, amount: u128, now: Timestamp) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        Self::require_address(owner)?;
        if amount == 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        // An address that never went through creation counts as inactive.
        let mut account = match self.accounts.get(owner).await? {
            Some(account) if account.active => account,
            _ => return Err(LedgerError::AccountNotActive),
        };
        if !self.vault.pay_in(owner, amount).await {
            return Err(LedgerError::TransferFailed);
        }
        account.credit(amount);
        self.accounts.store(account).await?;
        self.events
            .record(LedgerEvent::Deposited {
                owner,
                amount,
                at: now,
            })
            .await;
        Ok(())
    }

    /// Withdraws to the owner's external wallet. The balance mutation and the
    /// external transfer succeed or fail together: a refused payout leaves
    /// the entry untouched and raises [`LedgerError::TransferFailed`].
    pub async fn withdraw(&self, owner: Address, amount: u128, now: Timestamp) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        Self::require_address(owner)?;
        let mut account = match self.accounts.get(owner).await? {
            Some(account) if account.active => account,
            _ => return Err(LedgerError::AccountNotActive),
        };
        account.debit(amount)?;
        if !self.vault.pay_out(owner, amount).await {
            // Staged copy is dropped; nothing was stored.
            return Err(LedgerError::TransferFailed);
        }
        self.accounts.store(account).await?;
        self.events
            .record(LedgerEvent::Withdrawn {
                owner,
                amount,
                at: now,
            })
            .await;
        Ok(())
    }

    /// Pure bookkeeping between two entries; no external call, so it cannot
    /// partially fail. A recipient that never went through creation gets a
    /// passive (inactive) entry, which later makes creation fail for it.
    pub async fn transfer_funds(
        &self,
        from: Address,
        to: Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        Self::require_address(from)?;
        Self::require_address(to)?;
        if amount == 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        let mut sender = self
            .accounts
            .get(from)
            .await?
            .unwrap_or_else(|| Account::passive(from));
        sender.debit(amount)?;
        if from == to {
            // Self-transfer is a no-op once the balance check passed.
            self.events
                .record(LedgerEvent::Transferred {
                    from,
                    to,
                    amount,
                    at: now,
                })
                .await;
            return Ok(());
        }
        let mut recipient = self
            .accounts
            .get(to)
            .await?
            .unwrap_or_else(|| Account::passive(to));
        recipient.credit(amount);
        self.accounts.store(sender).await?;
        self.accounts.store(recipient).await?;
        self.events
            .record(LedgerEvent::Transferred {
                from,
                to,
                amount,
                at: now,
            })
            .await;
        Ok(())
    }

    /// Pays borrowed funds out of the custodied pool to the borrower's
    /// external wallet. Admin-gated.
    ///
    /// Unlike [`withdraw`](Self::withdraw), a refused transfer is reported
    /// through the returned boolean rather than an error; the caller decides
    /// how to react. Nothing is mutated either way.
    pub async fn settle_loan_disbursement(
        &self,
        borrower: Address,
        amount: u128,
        acting_admin: Address,
    ) -> Result<bool> {
        let _guard = self.op_lock.lock().await;
        self.require_admin(acting_admin)?;
        Self::require_address(borrower)?;
        if amount == 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        if self.vault.custodied().await < amount {
            return Err(LedgerError::InsufficientContractFunds);
        }
        if self.accounts.get(borrower).await?.is_none() {
            return Err(LedgerError::BorrowerHasNoAccount);
        }
        Ok(self.vault.pay_out(borrower, amount).await)
    }

    /// Records an inbound loan repayment into the custodied pool. Admin-gated.
    pub async fn settle_loan_repayment(
        &self,
        borrower: Address,
        amount: u128,
        acting_admin: Address,
        now: Timestamp,
    ) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        self.require_admin(acting_admin)?;
        Self::require_address(borrower)?;
        if amount == 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        if !self.vault.pay_in(borrower, amount).await {
            return Err(LedgerError::TransferFailed);
        }
        self.events
            .record(LedgerEvent::LoanRepaymentReceived {
                borrower,
                amount,
                at: now,
            })
            .await;
        Ok(())
    }

    /// Unconditionally admin-gated freeze. Business-rule gating (delinquency)
    /// belongs to the lending layer, not here.
    pub async fn freeze_account(
        &self,
        owner: Address,
        acting_admin: Address,
        now: Timestamp,
    ) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        self.require_admin(acting_admin)?;
        Self::require_address(owner)?;
        let mut account = match self.accounts.get(owner).await? {
            Some(account) if account.active => account,
            _ => return Err(LedgerError::AccountAlreadyFrozen),
        };
        account.active = false;
        self.accounts.store(account).await?;
        self.events
            .record(LedgerEvent::AccountFrozen {
                owner,
                by: acting_admin,
                at: now,
            })
            .await;
        Ok(())
    }

    /// Owner-paid reactivation. The fee goes into the custodied pool, not
    /// the owner's balance entry.
    pub async fn activate_account(
        &self,
        owner: Address,
        fee_paid: u128,
        now: Timestamp,
    ) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        Self::require_address(owner)?;
        let mut account = self
            .accounts
            .get(owner)
            .await?
            .ok_or(LedgerError::AccountNotActive)?;
        if account.active {
            return Err(LedgerError::AccountAlreadyActive);
        }
        if fee_paid < ACTIVATION_FEE {
            return Err(LedgerError::InsufficientActivationFee);
        }
        if !self.vault.pay_in(owner, fee_paid).await {
            return Err(LedgerError::TransferFailed);
        }
        account.active = true;
        self.accounts.store(account).await?;
        self.events
            .record(LedgerEvent::AccountActivated {
                owner,
                fee_paid,
                at: now,
            })
            .await;
        Ok(())
    }

    pub async fn get_balance(&self, owner: Address) -> Result<u128> {
        Self::require_address(owner)?;
        Ok(self
            .accounts
            .get(owner)
            .await?
            .map(|account| account.balance)
            .unwrap_or(0))
    }

    pub async fn is_account_active(&self, owner: Address) -> Result<bool> {
        Self::require_address(owner)?;
        Ok(self
            .accounts
            .get(owner)
            .await?
            .map(|account| account.active)
            .unwrap_or(false))
    }

    /// Total value held by the custodied pool. Does not generally equal the
    /// sum of balance entries once loans are outstanding.
    pub async fn custodied_funds(&self) -> u128 {
        self.vault.custodied().await
    }

    pub async fn all_accounts(&self) -> Result<Vec<Account>> {
        self.accounts.get_all().await
    }
}

use crate::application::ledger::AccountLedger;
use crate::domain::address::Address;
use crate::domain::event::{EventLog, LedgerEvent};
use crate::domain::loan::{
    Loan, DUE_DAY_PASSED_FEE, INTEREST_RATE_BPS, LOAN_TERM_SECS, MAX_BORROW_AMOUNT,
};
use crate::domain::ports::LoanStoreBox;
use crate::domain::Timestamp;
use crate::error::{LedgerError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Time-based interest-accruing loans against ledger accounts.
///
/// The engine owns the loan table and nothing else: all fund movement goes
/// through the [`AccountLedger`], which it is handed at construction together
/// with the admin capability it uses for settlement calls. Borrower state per
/// address is `NoLoan -> Active -> NoLoan`; repayment always settles the full
/// amount due in one call.
pub struct LendingEngine {
    loans: LoanStoreBox,
    ledger: Arc<AccountLedger>,
    events: EventLog,
    admin: Address,
    op_lock: Mutex<()>,
}

impl LendingEngine {
    pub fn new(
        loans: LoanStoreBox,
        ledger: Arc<AccountLedger>,
        events: EventLog,
        admin: Address,
    ) -> Self {
        Self {
            loans,
            ledger,
            events,
            admin,
            op_lock: Mutex::new(()),
        }
    }

    async fn loan_of(&self, borrower: Address) -> Result<Loan> {
        Ok(self
            .loans
            .get(borrower)
            .await?
            .unwrap_or_else(|| Loan::none(borrower)))
    }

    /// Originates or tops up the borrower's aggregate loan and disburses the
    /// funds to their external wallet.
    ///
    /// The loan record is stored only after the disbursement succeeds, so a
    /// refused transfer leaves no trace of the mutation. Each successive
    /// borrow resets the due date to a fresh term from `now`.
    pub async fn borrow(&self, borrower: Address, amount: u128, now: Timestamp) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        if borrower.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        if !self.ledger.is_account_active(borrower).await? {
            return Err(LedgerError::NotEligible);
        }
        let mut loan = self.loan_of(borrower).await?;
        if loan.principal >= MAX_BORROW_AMOUNT {
            return Err(LedgerError::NotEligible);
        }
        // Strictly-less-than required: the ceiling itself is unreachable.
        if loan.principal.saturating_add(amount) >= MAX_BORROW_AMOUNT {
            return Err(LedgerError::MaxBorrowAmountReached);
        }
        // Computed before any funds move so a clock past the representable
        // term cannot strand a completed disbursement.
        let due_at = now
            .checked_add(LOAN_TERM_SECS)
            .ok_or(LedgerError::AmountOverflow)?;
        // The ledger surfaces NonPositiveAmount, InsufficientContractFunds
        // and BorrowerHasNoAccount from here.
        if !self
            .ledger
            .settle_loan_disbursement(borrower, amount, self.admin)
            .await?
        {
            return Err(LedgerError::TransferFailed);
        }
        loan.principal += amount;
        loan.rate_bps = INTEREST_RATE_BPS;
        loan.borrowed_at = now;
        loan.due_at = due_at;
        self.loans.store(loan).await?;
        self.events
            .record(LedgerEvent::Borrowed {
                borrower,
                amount,
                due_at,
            })
            .await;
        Ok(())
    }

    /// Interest accrued up to `now`; zero when there is no principal or no
    /// elapsed time.
    pub async fn calculate_accrued_interest(
        &self,
        borrower: Address,
        now: Timestamp,
    ) -> Result<u128> {
        if borrower.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        self.loan_of(borrower)
            .await?
            .accrued_interest(now)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Principal plus accrued interest.
    pub async fn get_amount_due(&self, borrower: Address, now: Timestamp) -> Result<u128> {
        if borrower.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        self.loan_of(borrower)
            .await?
            .amount_due(now)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Settles the entire current amount due before the due date. Exact
    /// amount only; no overpayment or underpayment tolerance.
    pub async fn pay_back(&self, borrower: Address, paid: u128, now: Timestamp) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        let mut loan = self.repayable_loan(borrower).await?;
        if now > loan.due_at {
            return Err(LedgerError::DueDatePassed);
        }
        let expected = loan.amount_due(now).ok_or(LedgerError::AmountOverflow)?;
        if paid != expected {
            return Err(LedgerError::AmountMismatch { expected, paid });
        }
        self.settle(&mut loan, paid, now).await
    }

    /// The late-payment path: the amount due plus the flat late fee.
    pub async fn pay_back_with_late_fee(
        &self,
        borrower: Address,
        paid: u128,
        now: Timestamp,
    ) -> Result<()> {
        let _guard = self.op_lock.lock().await;
        let mut loan = self.repayable_loan(borrower).await?;
        let expected = loan
            .amount_due(now)
            .and_then(|due| due.checked_add(DUE_DAY_PASSED_FEE))
            .ok_or(LedgerError::AmountOverflow)?;
        if paid != expected {
            return Err(LedgerError::AmountMismatch { expected, paid });
        }
        self.settle(&mut loan, paid, now).await
    }

    async fn repayable_loan(&self, borrower: Address) -> Result<Loan> {
        if borrower.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        if !self.ledger.is_account_active(borrower).await? {
            return Err(LedgerError::AccountNotActive);
        }
        let loan = self.loan_of(borrower).await?;
        if !loan.is_outstanding() {
            return Err(LedgerError::BorrowerDoesNotExist);
        }
        Ok(loan)
    }

    async fn settle(&self, loan: &mut Loan, paid: u128, now: Timestamp) -> Result<()> {
        let borrower = loan.borrower;
        // A refused pay-in propagates before the record is touched.
        self.ledger
            .settle_loan_repayment(borrower, paid, self.admin, now)
            .await?;
        loan.clear();
        self.loans.store(loan.clone()).await?;
        self.events
            .record(LedgerEvent::PaidBack {
                borrower,
                amount: paid,
                at: now,
            })
            .await;
        Ok(())
    }

    /// Policy wrapper over the ledger's unconditional freeze: only legitimate
    /// as a delinquency response, so the loan must be outstanding and past
    /// due.
    pub async fn freeze_borrower_account(
        &self,
        borrower: Address,
        acting_admin: Address,
        now: Timestamp,
    ) -> Result<()> {
        if acting_admin != self.admin {
            return Err(LedgerError::Unauthorized);
        }
        if borrower.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        if !self.loan_of(borrower).await?.is_overdue(now) {
            return Err(LedgerError::NotEligible);
        }
        self.ledger.freeze_account(borrower, self.admin, now).await
    }

    /// Pass-through to the ledger's owner-paid activation.
    pub async fn activate_borrower_account(
        &self,
        borrower: Address,
        fee_paid: u128,
        now: Timestamp,
    ) -> Result<()> {
        self.ledger.activate_account(borrower, fee_paid, now).await
    }

    /// Copy of the borrower's loan record; the zeroed record when none exists.
    pub async fn get_borrower_details(&self, borrower: Address) -> Result<Loan> {
        if borrower.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        self.loan_of(borrower).await
    }
}

use crate::application::ledger::AccountLedger;
use crate::application::lending::LendingEngine;
use crate::domain::operation::{Operation, OperationKind};
use crate::domain::ports::Vault;
use crate::error::{LedgerError, Result};
use std::sync::Arc;

/// Dispatches boundary operations onto the core. One row in, one core call
/// out; a rejected row is reported back to the caller and changes nothing.
pub struct OperationProcessor {
    ledger: Arc<AccountLedger>,
    lending: LendingEngine,
    vault: Arc<dyn Vault>,
}

impl OperationProcessor {
    pub fn new(
        ledger: Arc<AccountLedger>,
        lending: LendingEngine,
        vault: Arc<dyn Vault>,
    ) -> Self {
        Self {
            ledger,
            lending,
            vault,
        }
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    pub async fn process(&self, op: Operation) -> Result<()> {
        let amount = || op.amount.ok_or(LedgerError::NonPositiveAmount);
        let target = || op.to.ok_or(LedgerError::InvalidAddress);

        match op.op {
            OperationKind::Fund => {
                self.vault.fund(op.actor, amount()?).await;
                Ok(())
            }
            OperationKind::Create => self.ledger.create_account(op.actor, amount()?, op.at).await,
            OperationKind::Deposit => self.ledger.deposit(op.actor, amount()?, op.at).await,
            OperationKind::Withdraw => self.ledger.withdraw(op.actor, amount()?, op.at).await,
            OperationKind::Transfer => {
                self.ledger
                    .transfer_funds(op.actor, target()?, amount()?, op.at)
                    .await
            }
            // The actor is the (authenticated) admin; `to` is the target.
            OperationKind::Freeze => self.ledger.freeze_account(target()?, op.actor, op.at).await,
            OperationKind::Activate => {
                self.ledger.activate_account(op.actor, amount()?, op.at).await
            }
            OperationKind::Borrow => self.lending.borrow(op.actor, amount()?, op.at).await,
            OperationKind::PayBack => self.lending.pay_back(op.actor, amount()?, op.at).await,
            OperationKind::PayBackLate => {
                self.lending
                    .pay_back_with_late_fee(op.actor, amount()?, op.at)
                    .await
            }
        }
    }
}

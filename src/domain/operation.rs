use crate::domain::address::Address;
use crate::domain::Timestamp;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Seeds an external wallet; handled by the vault, not the ledger.
    Fund,
    Create,
    Deposit,
    Withdraw,
    Transfer,
    Freeze,
    Activate,
    Borrow,
    PayBack,
    PayBackLate,
}

/// One row of the operations CSV. The boundary layer authenticates the
/// acting identity and passes it through explicitly; the core has no
/// implicit caller context.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct Operation {
    pub op: OperationKind,
    pub actor: Address,
    pub to: Option<Address>,
    pub amount: Option<u128>,
    pub at: Timestamp,
}

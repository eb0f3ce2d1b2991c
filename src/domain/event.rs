use crate::domain::address::Address;
use crate::domain::Timestamp;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Audit events observable at the boundary. Field order matches the public
/// interface contract and must not be rearranged.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    AccountCreated {
        owner: Address,
        deposit: u128,
        at: Timestamp,
    },
    Deposited {
        owner: Address,
        amount: u128,
        at: Timestamp,
    },
    Withdrawn {
        owner: Address,
        amount: u128,
        at: Timestamp,
    },
    Transferred {
        from: Address,
        to: Address,
        amount: u128,
        at: Timestamp,
    },
    AccountFrozen {
        owner: Address,
        by: Address,
        at: Timestamp,
    },
    AccountActivated {
        owner: Address,
        fee_paid: u128,
        at: Timestamp,
    },
    Borrowed {
        borrower: Address,
        amount: u128,
        due_at: Timestamp,
    },
    PaidBack {
        borrower: Address,
        amount: u128,
        at: Timestamp,
    },
    LoanRepaymentReceived {
        borrower: Address,
        amount: u128,
        at: Timestamp,
    },
}

/// Shared in-memory event sink. Both engines append to the same log so an
/// audit collaborator sees one ordered stream.
#[derive(Default, Clone)]
pub struct EventLog {
    inner: Arc<RwLock<Vec<LedgerEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, event: LedgerEvent) {
        self.inner.write().await.push(event);
    }

    pub async fn snapshot(&self) -> Vec<LedgerEvent> {
        self.inner.read().await.clone()
    }
}

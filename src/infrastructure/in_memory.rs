use crate::domain::account::Account;
use crate::domain::address::Address;
use crate::domain::loan::Loan;
use crate::domain::ports::{AccountStore, LoanStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for ledger accounts.
///
/// Uses `Arc<RwLock<HashMap<Address, Account>>>` to allow shared concurrent
/// access. Ideal for testing or runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Address, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn store(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.owner, account);
        Ok(())
    }

    async fn get(&self, owner: Address) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&owner).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().cloned().collect())
    }
}

/// A thread-safe in-memory store for loan records, keyed by borrower.
#[derive(Default, Clone)]
pub struct InMemoryLoanStore {
    loans: Arc<RwLock<HashMap<Address, Loan>>>,
}

impl InMemoryLoanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoanStore for InMemoryLoanStore {
    async fn store(&self, loan: Loan) -> Result<()> {
        let mut loans = self.loans.write().await;
        loans.insert(loan.borrower, loan);
        Ok(())
    }

    async fn get(&self, borrower: Address) -> Result<Option<Loan>> {
        let loans = self.loans.read().await;
        Ok(loans.get(&borrower).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Loan>> {
        let loans = self.loans.read().await;
        Ok(loans.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_account_store() {
        let store = InMemoryAccountStore::new();
        let account = Account::open(Address::from_low_u64(1), 100);

        store.store(account.clone()).await.unwrap();
        let retrieved = store.get(account.owner).await.unwrap().unwrap();
        assert_eq!(retrieved, account);

        assert!(store.get(Address::from_low_u64(2)).await.unwrap().is_none());
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_loan_store() {
        let store = InMemoryLoanStore::new();
        let mut loan = Loan::none(Address::from_low_u64(1));
        loan.principal = 50;

        store.store(loan.clone()).await.unwrap();
        let retrieved = store.get(loan.borrower).await.unwrap().unwrap();
        assert_eq!(retrieved, loan);

        // Storing again overwrites the single aggregate record.
        loan.principal = 75;
        store.store(loan.clone()).await.unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 1);
        assert_eq!(
            store.get(loan.borrower).await.unwrap().unwrap().principal,
            75
        );
    }
}

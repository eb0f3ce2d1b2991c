use crate::domain::account::Account;
use crate::domain::address::Address;
use crate::domain::loan::Loan;
use crate::domain::ports::{AccountStore, LoanStore};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, Options, DB};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Column Family for account entries.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family for loan records.
pub const CF_LOANS: &str = "loans";

/// Persistent storage for both tables, using one RocksDB instance with
/// separate Column Families and JSON-encoded values.
///
/// `Clone` shares the underlying `Arc<DB>`, so one handle can serve both the
/// account and loan ports.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a database at the given path, ensuring both column
    /// families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_loans = ColumnFamilyDescriptor::new(CF_LOANS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_loans])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: &Address, value: &T) -> Result<()> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| internal(format!("{cf_name} column family not found")))?;
        let bytes = serde_json::to_vec(value)
            .map_err(|e| internal(format!("serialization error: {e}")))?;
        self.db.put_cf(&cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, cf_name: &str, key: &Address) -> Result<Option<T>> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| internal(format!("{cf_name} column family not found")))?;
        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| internal(format!("deserialization error: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn scan<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| internal(format!("{cf_name} column family not found")))?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(
                serde_json::from_slice(&value)
                    .map_err(|e| internal(format!("deserialization error: {e}")))?,
            );
        }
        Ok(values)
    }
}

fn internal(message: String) -> LedgerError {
    LedgerError::Internal(Box::new(std::io::Error::other(message)))
}

#[async_trait]
impl AccountStore for RocksDbStore {
    async fn store(&self, account: Account) -> Result<()> {
        self.put(CF_ACCOUNTS, &account.owner, &account)
    }

    async fn get(&self, owner: Address) -> Result<Option<Account>> {
        self.fetch(CF_ACCOUNTS, &owner)
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        self.scan(CF_ACCOUNTS)
    }
}

#[async_trait]
impl LoanStore for RocksDbStore {
    async fn store(&self, loan: Loan) -> Result<()> {
        self.put(CF_LOANS, &loan.borrower, &loan)
    }

    async fn get(&self, borrower: Address) -> Result<Option<Loan>> {
        self.fetch(CF_LOANS, &borrower)
    }

    async fn get_all(&self) -> Result<Vec<Loan>> {
        self.scan(CF_LOANS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_creates_column_families() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_ACCOUNTS).is_some());
        assert!(store.db.cf_handle(CF_LOANS).is_some());
    }

    #[tokio::test]
    async fn test_account_round_trip() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let account = Account::open(Address::from_low_u64(1), 100);
        AccountStore::store(&store, account.clone()).await.unwrap();

        let retrieved = AccountStore::get(&store, account.owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved, account);

        let all = AccountStore::get_all(&store).await.unwrap();
        assert_eq!(all, vec![account]);

        assert!(AccountStore::get(&store, Address::from_low_u64(2))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_loan_round_trip() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let mut loan = Loan::none(Address::from_low_u64(1));
        loan.principal = 42;
        loan.rate_bps = 500;
        LoanStore::store(&store, loan.clone()).await.unwrap();

        let retrieved = LoanStore::get(&store, loan.borrower)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved, loan);
    }
}

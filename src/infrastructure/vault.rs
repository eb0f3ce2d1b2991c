use crate::domain::address::Address;
use crate::domain::ports::Vault;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory model of the value boundary: a custodied pool plus external
/// wallets per address.
///
/// Specific addresses can be marked as refusing payouts, standing in for a
/// recipient whose transfer fails; both settlement paths report that as a
/// plain `false` with nothing moved.
#[derive(Default, Clone)]
pub struct InMemoryVault {
    pool: Arc<RwLock<u128>>,
    wallets: Arc<RwLock<HashMap<Address, u128>>>,
    refused: Arc<RwLock<HashSet<Address>>>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an address so every payout to it is refused.
    pub async fn refuse_payouts_to(&self, owner: Address) {
        self.refused.write().await.insert(owner);
    }

    pub async fn allow_payouts_to(&self, owner: Address) {
        self.refused.write().await.remove(&owner);
    }
}

#[async_trait]
impl Vault for InMemoryVault {
    async fn custodied(&self) -> u128 {
        *self.pool.read().await
    }

    async fn wallet_balance(&self, owner: Address) -> u128 {
        self.wallets.read().await.get(&owner).copied().unwrap_or(0)
    }

    async fn fund(&self, owner: Address, amount: u128) {
        *self.wallets.write().await.entry(owner).or_insert(0) += amount;
    }

    async fn pay_in(&self, from: Address, amount: u128) -> bool {
        // Lock order: pool before wallets, same as pay_out.
        let mut pool = self.pool.write().await;
        let mut wallets = self.wallets.write().await;
        let Some(balance) = wallets.get_mut(&from) else {
            return false;
        };
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        *pool += amount;
        true
    }

    async fn pay_out(&self, to: Address, amount: u128) -> bool {
        if self.refused.read().await.contains(&to) {
            return false;
        }
        let mut pool = self.pool.write().await;
        let mut wallets = self.wallets.write().await;
        if *pool < amount {
            return false;
        }
        *pool -= amount;
        *wallets.entry(to).or_insert(0) += amount;
        true
    }
}

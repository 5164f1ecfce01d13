//! # Current Account Registry
//!
//! Cache-backed pointer to the account `!rank` and `!current` report on.
//! The pointer holds a `name/tag` identity and never expires.

use crate::domain::traits::CacheStore;
use crate::domain::types::Account;
use anyhow::{Result, bail};
use std::sync::Arc;

pub struct CurrentAccountRegistry {
    store: Arc<dyn CacheStore>,
    accounts: Arc<Vec<Account>>,
    key: String,
}

impl CurrentAccountRegistry {
    pub fn new(store: Arc<dyn CacheStore>, accounts: Arc<Vec<Account>>, prefix: &str) -> Self {
        Self {
            store,
            accounts,
            key: format!("{prefix}current"),
        }
    }

    /// Index of the current account. A missing pointer is re-established at index 0;
    /// an identity that is no longer configured also resolves to 0. Failing to write
    /// the pointer back is logged and does not fail the lookup.
    pub async fn get(&self) -> Result<usize> {
        let Some(identity) = self.store.get(&self.key).await? else {
            if let Err(e) = self.set(0).await {
                tracing::error!(event = "current_account_set", "{:#}", e);
            }
            return Ok(0);
        };

        Ok(self
            .accounts
            .iter()
            .position(|account| account.identity() == identity)
            .unwrap_or(0))
    }

    pub async fn set(&self, index: usize) -> Result<()> {
        let Some(account) = self.accounts.get(index) else {
            bail!("Account index {index} out of range");
        };
        self.store.set_persistent(&self.key, &account.identity()).await
    }
}

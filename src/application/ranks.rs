//! # Rank Service
//!
//! Cache-or-fetch resolution of an account's rank summary. Concurrent misses for the
//! same account may each reach the upstream API; both converge within the cache window.

use crate::application::rank_cache::RankCache;
use crate::domain::errors::StatsError;
use crate::domain::traits::RankSource;
use crate::domain::types::{Account, RankSummary};
use std::sync::Arc;

pub struct RankService {
    accounts: Arc<Vec<Account>>,
    cache: RankCache,
    source: Arc<dyn RankSource>,
}

impl RankService {
    pub fn new(accounts: Arc<Vec<Account>>, cache: RankCache, source: Arc<dyn RankSource>) -> Self {
        Self {
            accounts,
            cache,
            source,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Resolves the summary for `accounts[index]`, storing fresh results for a minute.
    pub async fn summary_for(&self, index: usize) -> Result<RankSummary, StatsError> {
        let account = self
            .accounts
            .get(index)
            .ok_or_else(|| StatsError::Transient(format!("No account at index {index}")))?;
        let key = account.identity();

        if let Some(cached) = self.cache.lookup(&key).await {
            if cached.account_index == index {
                tracing::debug!(event = "summary_cache_hit", account = %key);
                return Ok(cached.summary);
            }
        }

        let summary = self.source.resolve_rank(&account.name, &account.tag).await?;

        if let Err(e) = self.cache.store(&key, &summary, index).await {
            tracing::error!(event = "summary_cache_set", account = %key, "{:#}", e);
        }
        Ok(summary)
    }
}

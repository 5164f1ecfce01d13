//! # Rank Cache
//!
//! Short-lived memoization of resolved summaries, keyed by account identity.
//! Entries expire one minute after they are stored.

use crate::domain::traits::CacheStore;
use crate::domain::types::{CachedSummary, RankSummary};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

pub const SUMMARY_TTL: Duration = Duration::from_secs(60);

pub struct RankCache {
    store: Arc<dyn CacheStore>,
    prefix: String,
}

impl RankCache {
    pub fn new(store: Arc<dyn CacheStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    fn key(&self, account_key: &str) -> String {
        format!("{}summary:{}", self.prefix, account_key)
    }

    /// Absent, unreadable and corrupt entries are all a miss.
    pub async fn lookup(&self, account_key: &str) -> Option<CachedSummary> {
        let raw = match self.store.get(&self.key(account_key)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(event = "summary_cache_get", account = %account_key, "{:#}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cached) => Some(cached),
            Err(e) => {
                tracing::warn!(event = "summary_cache_decode", account = %account_key, "{}", e);
                None
            }
        }
    }

    pub async fn store(&self, account_key: &str, summary: &RankSummary, account_index: usize) -> Result<()> {
        let cached = CachedSummary {
            summary: summary.clone(),
            account_index,
        };
        let raw = serde_json::to_string(&cached)?;
        self.store
            .set_with_ttl(&self.key(account_key), &raw, SUMMARY_TTL)
            .await
    }
}

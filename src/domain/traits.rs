//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (chat, cache, stats sources).
//! Allows for pluggable implementations in the Infrastructure layer and fakes in tests.

use crate::domain::errors::StatsError;
use crate::domain::types::RankSummary;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Abstract interface for a Chat Provider (e.g., Twitch IRC)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the channel
    async fn say(&self, channel: &str, content: &str) -> Result<(), String>;
}

/// Key-value store with optional expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value that expires after `ttl`, replacing any existing entry.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Write a value with no expiry.
    async fn set_persistent(&self, key: &str, value: &str) -> Result<()>;
}

/// Primary source of rank data.
#[async_trait]
pub trait RankSource: Send + Sync {
    async fn resolve_rank(&self, name: &str, tag: &str) -> Result<RankSummary, StatsError>;
}

/// Best-effort secondary statistic. Never fails; returns the sentinel instead.
#[async_trait]
pub trait KillsSource: Send + Sync {
    async fn fetch_kills(&self, name: &str, tag: &str) -> String;
}

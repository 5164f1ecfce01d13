//! # Cache Stores
//!
//! Implementations of [`CacheStore`]: Redis for deployments (behind the `redis` feature)
//! and an in-process map with expiry deadlines for tests and redis-less builds.

use crate::domain::traits::CacheStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[cfg(feature = "redis")]
pub use self::redis_store::RedisStore;

#[cfg(feature = "redis")]
mod redis_store {
    use super::*;
    use anyhow::Context;
    use redis::AsyncCommands;
    use redis::aio::ConnectionManager;

    #[derive(Clone)]
    pub struct RedisStore {
        conn: ConnectionManager,
    }

    impl RedisStore {
        pub async fn connect(url: &str) -> Result<Self> {
            let client = redis::Client::open(url).context("Invalid cache URL")?;
            let conn = client
                .get_connection_manager()
                .await
                .context("Failed to connect to cache")?;
            Ok(Self { conn })
        }
    }

    #[async_trait]
    impl CacheStore for RedisStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            let mut conn = self.conn.clone();
            let value: Option<String> = conn.get(key).await?;
            Ok(value)
        }

        async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
            let mut conn = self.conn.clone();
            let _: () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;
            Ok(())
        }

        // A plain SET discards any previous TTL.
        async fn set_persistent(&self, key: &str, value: &str) -> Result<()> {
            let mut conn = self.conn.clone();
            let _: () = conn.set(key, value).await?;
            Ok(())
        }
    }
}

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

#[derive(Default)]
#[cfg_attr(feature = "redis", allow(dead_code))]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

#[cfg_attr(feature = "redis", allow(dead_code))]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries.lock().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn set_persistent(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }
}

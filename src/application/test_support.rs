//! Fakes shared by the router and command tests.

use crate::domain::errors::StatsError;
use crate::domain::traits::{CacheStore, ChatProvider, RankSource};
use crate::domain::types::{Account, ChatMessage, RankSummary};
use anyhow::bail;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Records everything said, per channel.
#[derive(Default)]
pub struct RecordingChat {
    pub said: Mutex<Vec<(String, String)>>,
}

impl RecordingChat {
    pub fn replies(&self) -> Vec<String> {
        self.said.lock().unwrap().iter().map(|(_, text)| text.clone()).collect()
    }

    pub fn last(&self) -> Option<String> {
        self.replies().pop()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn say(&self, channel: &str, content: &str) -> Result<(), String> {
        self.said
            .lock()
            .unwrap()
            .push((channel.to_string(), content.to_string()));
        Ok(())
    }
}

/// Rank source that counts upstream fetches and can be told to fail.
pub struct CountingSource {
    pub calls: AtomicUsize,
    pub failure: Option<StatsError>,
}

impl CountingSource {
    pub fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: None,
        }
    }

    pub fn failing(err: StatsError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(err),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RankSource for CountingSource {
    async fn resolve_rank(&self, name: &str, tag: &str) -> Result<RankSummary, StatsError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as i32;
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(RankSummary {
            name: name.to_string(),
            tag: tag.to_string(),
            rank: "Gold 1".into(),
            elo: 1100 + n,
            rr: 0,
            change: 12,
            win_rate: "25.00%".into(),
            kills: "Unknown".into(),
        })
    }
}

/// Store that is empty on every read and rejects every write.
pub struct ReadOnlyStore;

#[async_trait]
impl CacheStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl: Duration) -> anyhow::Result<()> {
        bail!("READONLY You can't write against a read only replica")
    }

    async fn set_persistent(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        bail!("READONLY You can't write against a read only replica")
    }
}

pub fn roster() -> Vec<Account> {
    vec![
        Account {
            name: "Jollz".into(),
            tag: "EUW".into(),
            id: "Main".into(),
            command: "!main".into(),
            stats: Vec::new(),
        },
        Account {
            name: "JollzAlt".into(),
            tag: "0001".into(),
            id: "Alt".into(),
            command: "!alt".into(),
            stats: vec!["winrate".into(), "kills".into()],
        },
        Account {
            name: "JollzNA".into(),
            tag: "NA1".into(),
            id: "NA".into(),
            command: "!na".into(),
            stats: vec!["elo".into()],
        },
    ]
}

pub fn message(text: &str, sender: &str, tags: &[(&str, &str)]) -> ChatMessage {
    ChatMessage {
        channel: "jollz".into(),
        text: text.into(),
        sender_display_name: sender.into(),
        sender_login: sender.to_lowercase(),
        tags: tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

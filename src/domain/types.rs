//! # Domain Types
//!
//! Common data structures used across the rank pipeline: the configured roster entry,
//! the resolved rank snapshot and the inbound chat message.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Sentinel shown whenever the secondary kill statistic could not be obtained.
pub const KILLS_UNKNOWN: &str = "Unknown";

/// Label used when the stats API reports no competitive tier.
pub const UNRATED: &str = "Unrated";

/// One operator-configured player identity tracked by the bot.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Account {
    pub name: String,
    pub tag: String,
    /// Display id used as the reply prefix.
    pub id: String,
    /// Chat alias resolving directly to this account (e.g. `!main`).
    #[serde(default)]
    pub command: String,
    /// Requested stat keys, in display order. Empty means the default set.
    #[serde(default)]
    pub stats: Vec<String>,
}

impl Account {
    /// Identity string used for cache keys and the current-account pointer.
    pub fn identity(&self) -> String {
        format!("{}/{}", self.name, self.tag)
    }
}

/// A statistic an account can ask to have displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKey {
    Rank,
    Elo,
    Rr,
    WinRate,
    Change,
    Kills,
}

impl StatKey {
    pub const DEFAULT_SET: [StatKey; 3] = [StatKey::Rank, StatKey::Elo, StatKey::Rr];

    /// Parses a configured key. Unknown keys yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "rank" => Some(Self::Rank),
            "elo" => Some(Self::Elo),
            "rr" => Some(Self::Rr),
            "winrate" => Some(Self::WinRate),
            "change" => Some(Self::Change),
            "kills" => Some(Self::Kills),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rank => "Current Rank",
            Self::Elo => "Elo",
            Self::Rr => "RR",
            Self::WinRate => "Winrate",
            Self::Change => "Change",
            Self::Kills => "Kills",
        }
    }
}

/// Resolved, aggregated rank snapshot for one account at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankSummary {
    pub name: String,
    pub tag: String,
    pub rank: String,
    pub elo: i32,
    pub rr: i32,
    pub change: i32,
    #[serde(rename = "winrate")]
    pub win_rate: String,
    pub kills: String,
}

/// Ranked record for a single season slot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeasonRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default, rename = "number_of_games")]
    pub games_played: u32,
    #[serde(default, deserialize_with = "deserialize_error_flag")]
    pub error: Option<String>,
}

impl SeasonRecord {
    /// A slot carrying an error flag has no usable data.
    pub fn has_data(&self) -> bool {
        self.error.is_none()
    }
}

/// The API reports "no error" as a missing field, `null`, `false` or `""`.
fn deserialize_error_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// A summary as persisted in the cache, tagged with its roster position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSummary {
    #[serde(flatten)]
    pub summary: RankSummary,
    pub account_index: usize,
}

/// Inbound chat message, independent of the transport that delivered it.
#[derive(Debug, Clone, Default)]
pub struct ChatMessage {
    pub channel: String,
    pub text: String,
    pub sender_display_name: String,
    pub sender_login: String,
    pub tags: HashMap<String, String>,
}

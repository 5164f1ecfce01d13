//! # Configuration
//!
//! Manages the loading and parsing of the bot's configuration file (`config.yaml`).
//! Defines the structs for the chat, cache and stats services plus the account roster,
//! and validates them once at startup. A failure here is fatal.

use crate::domain::types::{Account, StatKey};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Commands handled by the router itself. Aliases may not shadow them.
pub const BUILTIN_COMMANDS: [&str; 5] = ["!rank", "!accounts", "!setcurrent", "!current", "!bot"];

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub accounts: Vec<Account>,
}

/// Configuration for the connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub twitch: TwitchConfig,
    pub cache: CacheConfig,
    pub stats: StatsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TwitchConfig {
    pub username: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_token_env")]
    pub token_env: String, // e.g. "TWITCH_TOKEN"
    pub channel: String,
}

impl TwitchConfig {
    /// Resolves the OAuth token from the file or, failing that, from the environment.
    pub fn resolve_token(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        if let Some(token) = self.token.as_ref().filter(|t| !t.is_empty()) {
            return Ok(token.clone());
        }
        lookup(&self.token_env)
            .filter(|t| !t.is_empty())
            .with_context(|| format!("No Twitch token configured and {} is not set", self.token_env))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub url: String,
    #[serde(default = "default_cache_prefix")]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatsConfig {
    pub rank_api_url: String,
    pub tracker_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl StatsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file: default_log_file(),
            filter: None,
        }
    }
}

fn default_token_env() -> String {
    "TWITCH_TOKEN".to_string()
}
fn default_cache_prefix() -> String {
    "rankbot:".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_log_dir() -> String {
    "data".to_string()
}
fn default_log_file() -> String {
    "session.log".to_string()
}

impl AppConfig {
    /// Reads, parses and validates the configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;
        config.validate()?;
        Ok(config)
    }

    /// `(account id, key)` pairs for stat keys that will be skipped when rendering.
    pub fn unknown_stat_keys(&self) -> Vec<(String, String)> {
        self.accounts
            .iter()
            .flat_map(|account| {
                account
                    .stats
                    .iter()
                    .filter(|key| StatKey::parse(key).is_none())
                    .map(|key| (account.id.clone(), key.clone()))
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.services.twitch.channel.trim().is_empty() {
            bail!("services.twitch.channel must not be empty");
        }
        if self.accounts.is_empty() {
            bail!("At least one account must be configured");
        }

        reqwest::Url::parse(&self.services.stats.rank_api_url)
            .context("services.stats.rank_api_url is not a valid URL")?;
        reqwest::Url::parse(&self.services.stats.tracker_url)
            .context("services.stats.tracker_url is not a valid URL")?;

        let mut aliases = HashSet::new();
        for (i, account) in self.accounts.iter().enumerate() {
            if account.name.is_empty() || account.tag.is_empty() || account.id.is_empty() {
                bail!("Account #{} needs a name, tag and id", i + 1);
            }

            if account.command.is_empty() {
                continue;
            }
            let alias = account.command.to_lowercase();
            if BUILTIN_COMMANDS.contains(&alias.as_str()) {
                bail!("Account '{}' alias {} shadows a built-in command", account.id, account.command);
            }
            if !aliases.insert(alias) {
                bail!("Duplicate command alias {}", account.command);
            }
        }
        Ok(())
    }
}

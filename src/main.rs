//! # Main Entry Point
//!
//! Wires the bot together:
//! - Domain: Configuration and Types
//! - Infrastructure: Twitch, Cache, Stats API, Tracker, Logging
//! - Application: Router, Rank Service, Registry, Formatter
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use twitch_irc::ClientConfig;
use twitch_irc::login::StaticLoginCredentials;
use twitch_irc::message::ServerMessage;

use crate::application::rank_cache::RankCache;
use crate::application::ranks::RankService;
use crate::application::registry::CurrentAccountRegistry;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::traits::CacheStore;
use crate::domain::types::ChatMessage;
use crate::infrastructure::stats::StatsGateway;
use crate::infrastructure::tracker::TrackerScraper;
use crate::infrastructure::twitch::{TwitchClient, TwitchService};
use crate::strings::logs;

#[derive(Debug, Parser)]
#[command(version, about = "Twitch chat bot reporting competitive rank for a roster of accounts")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, short, default_value = "data/config.yaml")]
    config: PathBuf,
}

#[cfg(feature = "redis")]
async fn cache_store(config: &AppConfig) -> Result<Arc<dyn CacheStore>> {
    let store = crate::infrastructure::cache::RedisStore::connect(&config.services.cache.url).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "redis"))]
async fn cache_store(_config: &AppConfig) -> Result<Arc<dyn CacheStore>> {
    Ok(Arc::new(crate::infrastructure::cache::MemoryStore::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let _guard = infrastructure::logging::init(&config.logging)?;
    tracing::info!("{}", logs::STARTING);
    tracing::info!(
        "{}",
        logs::config_loaded(&config.services.twitch.username, config.accounts.len())
    );
    for (account, key) in config.unknown_stat_keys() {
        tracing::warn!(account = %account, key = %key, "Unknown stat key will be ignored");
    }

    let token = config
        .services
        .twitch
        .resolve_token(|name| std::env::var(name).ok())?;

    // 3. Initialize Infrastructure
    let http = reqwest::Client::builder()
        .timeout(config.services.stats.timeout())
        .build()
        .context("Failed to create HTTP client")?;
    let kills = Arc::new(TrackerScraper::new(http.clone(), &config.services.stats)?);
    let gateway = Arc::new(StatsGateway::new(http, &config.services.stats, kills)?);
    let store = cache_store(&config).await?;

    // 4. Initialize Application Components
    let accounts = Arc::new(config.accounts.clone());
    let prefix = config.services.cache.prefix.as_str();
    let ranks = Arc::new(RankService::new(
        accounts.clone(),
        RankCache::new(store.clone(), prefix),
        gateway,
    ));
    let registry = Arc::new(CurrentAccountRegistry::new(store, accounts, prefix));
    if let Err(e) = registry.get().await {
        tracing::error!("{}", logs::pointer_init_failed(&format!("{e:#}")));
    }

    let channel = config.services.twitch.channel.trim_start_matches('#').to_lowercase();
    let router = Arc::new(CommandRouter::new(&channel, ranks, registry));

    // 5. Twitch Setup
    let credentials = StaticLoginCredentials::new(config.services.twitch.username.clone(), Some(token));
    let (mut incoming, client) = TwitchClient::new(ClientConfig::new_simple(credentials));
    let chat = Arc::new(TwitchService::new(client.clone()));

    tracing::info!("{}", logs::joining(&channel));
    client
        .join(channel.clone())
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("Invalid channel name")?;

    // 6. Event Loop
    while let Some(server_message) = incoming.recv().await {
        match server_message {
            ServerMessage::Privmsg(privmsg) => {
                let message = ChatMessage::from(&privmsg);
                tracing::debug!(
                    "Received message from {}: {}",
                    message.sender_login,
                    message.text
                );

                let router = router.clone();
                let chat = chat.clone();
                tokio::spawn(async move {
                    if let Err(e) = router.route(chat.as_ref(), &message).await {
                        tracing::error!("{}", logs::route_failed(&format!("{e:#}")));
                    }
                });
            }
            ServerMessage::GlobalUserState(_) => {
                tracing::info!(event = "irc_connected", "{}", logs::IRC_CONNECTED);
            }
            _ => {}
        }
    }

    tracing::warn!("{}", logs::INCOMING_CLOSED);
    Ok(())
}

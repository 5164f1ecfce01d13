//! # Command Router
//!
//! Routes incoming chat messages to the appropriate command handler (in `interface/commands`).
//! Classification uses the lowercased first token of the message; authorization for the
//! administrative commands is re-checked on every invocation.

use anyhow::Result;
use std::sync::Arc;

use crate::application::ranks::RankService;
use crate::application::registry::CurrentAccountRegistry;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{Account, ChatMessage};
use crate::interface::commands;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Rank,
    Accounts,
    SetCurrent(String),
    Current,
    Bot,
    /// Rank for the account at this roster index.
    Alias(usize),
}

impl Command {
    /// Returns `None` for anything that is not a command.
    pub fn classify(text: &str, accounts: &[Account]) -> Option<Self> {
        let text = text.trim();
        let (token, args) = match text.split_once(char::is_whitespace) {
            Some((token, args)) => (token, args.trim()),
            None => (text, ""),
        };
        let token = token.to_lowercase();

        match token.as_str() {
            "!rank" => Some(Self::Rank),
            "!accounts" => Some(Self::Accounts),
            "!setcurrent" => Some(Self::SetCurrent(args.to_string())),
            "!current" => Some(Self::Current),
            "!bot" => Some(Self::Bot),
            _ => accounts
                .iter()
                .position(|a| !a.command.is_empty() && a.command.to_lowercase() == token)
                .map(Self::Alias),
        }
    }

    fn requires_mod(&self) -> bool {
        matches!(self, Self::Accounts | Self::SetCurrent(_))
    }
}

/// Moderators (`mod=1`) and the broadcaster are authorized. A missing tag is not.
pub fn is_mod_or_broadcaster(message: &ChatMessage) -> bool {
    if message.tags.get("mod").is_some_and(|flag| flag == "1") {
        return true;
    }
    message
        .sender_display_name
        .eq_ignore_ascii_case(&message.channel)
        || message.sender_login.eq_ignore_ascii_case(&message.channel)
}

pub struct CommandRouter {
    channel: String,
    ranks: Arc<RankService>,
    registry: Arc<CurrentAccountRegistry>,
}

impl CommandRouter {
    pub fn new(channel: &str, ranks: Arc<RankService>, registry: Arc<CurrentAccountRegistry>) -> Self {
        Self {
            channel: channel.trim_start_matches('#').to_lowercase(),
            ranks,
            registry,
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &ChatMessage) -> Result<()>
    where
        C: ChatProvider,
    {
        if !message.channel.eq_ignore_ascii_case(&self.channel) {
            return Ok(());
        }

        let Some(command) = Command::classify(&message.text, self.ranks.accounts()) else {
            return Ok(());
        };

        tracing::info!(
            "Router dispatching cmd={:?} sender='{}'",
            command,
            message.sender_display_name
        );

        if command.requires_mod() && !is_mod_or_broadcaster(message) {
            tracing::info!(event = "auth_denied", sender = %message.sender_login, "{:?}", command);
            return commands::misc::handle_denied(chat, message).await;
        }

        match command {
            Command::Rank => commands::rank::handle_rank(&self.ranks, &self.registry, chat, message).await,
            Command::Alias(index) => commands::rank::handle_alias(&self.ranks, index, chat, message).await,
            Command::Accounts => commands::accounts::handle_accounts(self.ranks.accounts(), chat, message).await,
            Command::SetCurrent(args) => {
                commands::accounts::handle_set_current(
                    self.ranks.accounts(),
                    &self.registry,
                    chat,
                    message,
                    &args,
                )
                .await
            }
            Command::Current => {
                commands::accounts::handle_current(self.ranks.accounts(), &self.registry, chat, message).await
            }
            Command::Bot => commands::misc::handle_bot(chat, message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::rank_cache::RankCache;
    use crate::application::test_support::{CountingSource, ReadOnlyStore, RecordingChat, message, roster};
    use crate::domain::errors::StatsError;
    use crate::domain::traits::CacheStore;
    use crate::infrastructure::cache::MemoryStore;
    use std::time::Duration;

    struct Harness {
        router: CommandRouter,
        chat: RecordingChat,
        source: Arc<CountingSource>,
        store: Arc<MemoryStore>,
    }

    fn harness(source: CountingSource) -> Harness {
        let store = Arc::new(MemoryStore::new());
        let accounts = Arc::new(roster());
        let source = Arc::new(source);
        let ranks = Arc::new(RankService::new(
            accounts.clone(),
            RankCache::new(store.clone(), "t:"),
            source.clone(),
        ));
        let registry = Arc::new(CurrentAccountRegistry::new(store.clone(), accounts, "t:"));
        Harness {
            router: CommandRouter::new("#Jollz", ranks, registry),
            chat: RecordingChat::default(),
            source,
            store,
        }
    }

    const MOD: &[(&str, &str)] = &[("mod", "1")];

    impl Harness {
        async fn send(&self, text: &str, sender: &str, tags: &[(&str, &str)]) {
            self.router
                .route(&self.chat, &message(text, sender, tags))
                .await
                .unwrap();
        }

        async fn current(&self) -> Option<String> {
            self.store.get("t:current").await.unwrap()
        }
    }

    #[test]
    fn test_classify() {
        let accounts = roster();
        assert_eq!(Command::classify("!RANK please", &accounts), Some(Command::Rank));
        assert_eq!(
            Command::classify("!setcurrent  JollzAlt ", &accounts),
            Some(Command::SetCurrent("JollzAlt".into()))
        );
        assert_eq!(Command::classify("!setcurrent", &accounts), Some(Command::SetCurrent(String::new())));
        assert_eq!(Command::classify("!Alt", &accounts), Some(Command::Alias(1)));
        assert_eq!(Command::classify("!ranked", &accounts), None);
        assert_eq!(Command::classify("hello !rank", &accounts), None);
        assert_eq!(Command::classify("", &accounts), None);
    }

    #[test]
    fn test_authorization() {
        assert!(is_mod_or_broadcaster(&message("!accounts", "SomeMod", &[("mod", "1")])));
        assert!(is_mod_or_broadcaster(&message("!accounts", "JOLLZ", &[("mod", "0")])));
        assert!(!is_mod_or_broadcaster(&message("!accounts", "viewer", &[("mod", "0")])));
        // A missing mod tag does not grant access.
        assert!(!is_mod_or_broadcaster(&message("!accounts", "viewer", &[])));
    }

    #[tokio::test]
    async fn test_rank_for_current_account() {
        let h = harness(CountingSource::ok());
        h.send("!rank", "viewer", &[]).await;

        assert_eq!(h.chat.last().unwrap(), "Main: Current Rank: Gold 1 | Elo: 1100 | RR: 0");
        assert_eq!(h.current().await.as_deref(), Some("Jollz/EUW"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_rank_within_window_is_cached() {
        let h = harness(CountingSource::ok());
        h.send("!rank", "viewer", &[]).await;
        tokio::time::advance(Duration::from_secs(45)).await;
        h.send("!rank", "viewer", &[]).await;

        let replies = h.chat.replies();
        assert_eq!(replies[0], replies[1]);
        assert_eq!(h.source.calls(), 1);

        tokio::time::advance(Duration::from_secs(30)).await;
        h.send("!rank", "viewer", &[]).await;
        assert_eq!(h.source.calls(), 2);
        assert_eq!(h.chat.last().unwrap(), "Main: Current Rank: Gold 1 | Elo: 1101 | RR: 0");
    }

    #[tokio::test]
    async fn test_player_not_found_replies_generic_error() {
        let h = harness(CountingSource::failing(StatsError::PlayerNotFound));
        h.send("!rank", "viewer", &[]).await;
        assert_eq!(h.chat.replies(), vec!["Error getting rank"]);
    }

    #[tokio::test]
    async fn test_transient_failure_is_not_cached() {
        let h = harness(CountingSource::failing(StatsError::Transient("timeout".into())));
        h.send("!main", "viewer", &[]).await;
        h.send("!main", "viewer", &[]).await;
        assert_eq!(h.source.calls(), 2);
        assert_eq!(h.chat.replies(), vec!["Error getting rank", "Error getting rank"]);
    }

    #[tokio::test]
    async fn test_alias_uses_account_preferences() {
        let h = harness(CountingSource::ok());
        h.send("!alt", "viewer", &[]).await;
        assert_eq!(h.chat.last().unwrap(), "Alt: Winrate: 25.00% | Kills: Unknown");
        // Aliases do not move the current pointer.
        assert_eq!(h.current().await, None);
    }

    #[tokio::test]
    async fn test_set_current_by_index() {
        let h = harness(CountingSource::ok());
        h.send("!setcurrent 2", "SomeMod", MOD).await;

        assert_eq!(h.chat.last().unwrap(), "@SomeMod: Current account set to JollzAlt (Alt)");
        assert_eq!(h.current().await.as_deref(), Some("JollzAlt/0001"));

        h.send("!rank", "viewer", &[]).await;
        assert_eq!(h.chat.last().unwrap(), "Alt: Winrate: 25.00% | Kills: Unknown");
    }

    #[tokio::test]
    async fn test_set_current_out_of_range() {
        let h = harness(CountingSource::ok());
        h.send("!setcurrent 3", "SomeMod", MOD).await;
        h.send("!setcurrent 4", "SomeMod", MOD).await;
        assert_eq!(h.chat.last().unwrap(), "@SomeMod: Invalid account number");
        assert_eq!(h.current().await.as_deref(), Some("JollzNA/NA1"));

        h.send("!setcurrent 0", "SomeMod", MOD).await;
        h.send("!setcurrent -1", "SomeMod", MOD).await;
        assert_eq!(h.chat.last().unwrap(), "@SomeMod: Invalid account number");
        assert_eq!(h.current().await.as_deref(), Some("JollzNA/NA1"));
    }

    #[tokio::test]
    async fn test_set_current_by_name() {
        let h = harness(CountingSource::ok());
        h.send("!setcurrent jollzna", "Jollz", &[]).await;
        assert_eq!(h.current().await.as_deref(), Some("JollzNA/NA1"));

        h.send("!setcurrent unknownname", "Jollz", &[]).await;
        assert_eq!(h.chat.last().unwrap(), "@Jollz: Account not found");
        assert_eq!(h.current().await.as_deref(), Some("JollzNA/NA1"));
    }

    #[tokio::test]
    async fn test_set_current_without_argument() {
        let h = harness(CountingSource::ok());
        h.send("!setcurrent", "SomeMod", MOD).await;
        assert_eq!(h.chat.last().unwrap(), "@SomeMod: Usage: !setcurrent <name or number>");
        assert_eq!(h.current().await, None);
    }

    #[tokio::test]
    async fn test_admin_commands_denied_for_viewers() {
        let h = harness(CountingSource::ok());
        h.send("!setcurrent 2", "viewer", &[("mod", "0")]).await;
        h.send("!accounts", "viewer", &[]).await;

        assert_eq!(
            h.chat.replies(),
            vec![
                "@viewer: Only moderators can use that command",
                "@viewer: Only moderators can use that command"
            ]
        );
        assert_eq!(h.current().await, None);
    }

    #[tokio::test]
    async fn test_accounts_listing() {
        let h = harness(CountingSource::ok());
        h.send("!accounts", "SomeMod", MOD).await;
        assert_eq!(
            h.chat.last().unwrap(),
            "Accounts: 1. Jollz (Main), 2. JollzAlt (Alt), 3. JollzNA (NA)"
        );
    }

    #[tokio::test]
    async fn test_current_and_bot() {
        let h = harness(CountingSource::ok());
        h.send("!current", "viewer", &[]).await;
        h.send("!bot", "viewer", &[]).await;
        assert_eq!(
            h.chat.replies(),
            vec!["@viewer: Current account is Jollz (Main)", "@viewer: Hello"]
        );
    }

    #[tokio::test]
    async fn test_ignores_other_channels_and_chatter() {
        let h = harness(CountingSource::ok());
        let mut elsewhere = message("!bot", "viewer", &[]);
        elsewhere.channel = "someoneelse".into();
        h.router.route(&h.chat, &elsewhere).await.unwrap();
        h.send("gg wp", "viewer", &[]).await;
        h.send("!unknown", "viewer", &[]).await;

        assert!(h.chat.replies().is_empty());
        assert_eq!(h.source.calls(), 0);
    }

    #[tokio::test]
    async fn test_roster_reorder_invalidates_cached_summary() {
        let h = harness(CountingSource::ok());
        let stale = serde_json::json!({
            "name": "Jollz", "tag": "EUW", "rank": "Iron 1", "elo": 1, "rr": 1,
            "change": 0, "winrate": "0%", "kills": "Unknown", "account_index": 2
        });
        h.store
            .set_with_ttl("t:summary:Jollz/EUW", &stale.to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        h.send("!main", "viewer", &[]).await;
        assert_eq!(h.source.calls(), 1);
        assert_eq!(h.chat.last().unwrap(), "Main: Current Rank: Gold 1 | Elo: 1100 | RR: 0");
    }

    #[tokio::test]
    async fn test_rank_answers_when_store_rejects_writes() {
        let store = Arc::new(ReadOnlyStore);
        let accounts = Arc::new(roster());
        let source = Arc::new(CountingSource::ok());
        let ranks = Arc::new(RankService::new(
            accounts.clone(),
            RankCache::new(store.clone(), "t:"),
            source.clone(),
        ));
        let registry = Arc::new(CurrentAccountRegistry::new(store, accounts, "t:"));
        let router = CommandRouter::new("#Jollz", ranks, registry);
        let chat = RecordingChat::default();

        router.route(&chat, &message("!rank", "viewer", &[])).await.unwrap();

        assert_eq!(chat.replies(), vec!["Main: Current Rank: Gold 1 | Elo: 1100 | RR: 0"]);
        assert_eq!(source.calls(), 1);
    }
}

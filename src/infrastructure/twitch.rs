//! # Twitch Service Adapter
//!
//! Implements the `ChatProvider` trait for Twitch chat using the `twitch_irc` client.
//! Also converts inbound `PRIVMSG`s into transport-independent [`ChatMessage`]s,
//! carrying over the already-unescaped IRCv3 tags the router uses for authorization.

use crate::domain::traits::ChatProvider;
use crate::domain::types::ChatMessage;
use async_trait::async_trait;
use twitch_irc::login::StaticLoginCredentials;
use twitch_irc::message::PrivmsgMessage;
use twitch_irc::{SecureTCPTransport, TwitchIRCClient};

pub type TwitchClient = TwitchIRCClient<SecureTCPTransport, StaticLoginCredentials>;

#[derive(Clone)]
pub struct TwitchService {
    client: TwitchClient,
}

impl TwitchService {
    pub fn new(client: TwitchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatProvider for TwitchService {
    async fn say(&self, channel: &str, content: &str) -> Result<(), String> {
        tracing::info!("Bot sending message to #{}: {}", channel, content);
        self.client
            .say(channel.to_string(), content.to_string())
            .await
            .map_err(|e| e.to_string())
    }
}

impl From<&PrivmsgMessage> for ChatMessage {
    fn from(msg: &PrivmsgMessage) -> Self {
        ChatMessage {
            channel: msg.channel_login.clone(),
            text: msg.message_text.clone(),
            sender_display_name: msg.sender.name.clone(),
            sender_login: msg.sender.login.clone(),
            tags: msg
                .source
                .tags
                .0
                .iter()
                .map(|(key, value)| (key.clone(), value.clone().unwrap_or_default()))
                .collect(),
        }
    }
}

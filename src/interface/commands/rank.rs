//! # Rank Commands
//!
//! Handles `!rank` (current account) and the per-account aliases.

use crate::application::formatter;
use crate::application::ranks::RankService;
use crate::application::registry::CurrentAccountRegistry;
use crate::domain::traits::ChatProvider;
use crate::domain::types::ChatMessage;
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_rank(
    ranks: &RankService,
    registry: &CurrentAccountRegistry,
    chat: &impl ChatProvider,
    message: &ChatMessage,
) -> Result<()> {
    let index = match registry.get().await {
        Ok(index) => index,
        Err(e) => {
            tracing::error!(event = "current_account_get", "{:#}", e);
            return chat
                .say(&message.channel, messages::RANK_ERROR)
                .await
                .map_err(|e| anyhow::anyhow!(e));
        }
    };
    reply_rank(ranks, index, chat, message).await
}

pub async fn handle_alias(
    ranks: &RankService,
    index: usize,
    chat: &impl ChatProvider,
    message: &ChatMessage,
) -> Result<()> {
    reply_rank(ranks, index, chat, message).await
}

async fn reply_rank(
    ranks: &RankService,
    index: usize,
    chat: &impl ChatProvider,
    message: &ChatMessage,
) -> Result<()> {
    let reply = match (ranks.summary_for(index).await, ranks.accounts().get(index)) {
        (Ok(summary), Some(account)) => formatter::render(&summary, account),
        (Err(e), _) => {
            tracing::warn!(event = "rank_command", sender = %message.sender_login, "{}", e);
            messages::RANK_ERROR.to_string()
        }
        (Ok(_), None) => messages::RANK_ERROR.to_string(),
    };

    chat.say(&message.channel, &reply)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

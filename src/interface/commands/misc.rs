//! # Miscellaneous Commands
//!
//! Handles `!bot` and the reply for unauthorized administrative commands.

use crate::domain::traits::ChatProvider;
use crate::domain::types::ChatMessage;
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_bot(chat: &impl ChatProvider, message: &ChatMessage) -> Result<()> {
    chat.say(
        &message.channel,
        &messages::mention(&message.sender_display_name, messages::HELLO),
    )
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

pub async fn handle_denied(chat: &impl ChatProvider, message: &ChatMessage) -> Result<()> {
    chat.say(
        &message.channel,
        &messages::mention(&message.sender_display_name, messages::AUTH_DENIED),
    )
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

//! # Account Commands
//!
//! Handles `!accounts`, `!setcurrent` and `!current`.

use crate::application::registry::CurrentAccountRegistry;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{Account, ChatMessage};
use crate::strings::messages;
use anyhow::Result;

async fn reply_to(chat: &impl ChatProvider, message: &ChatMessage, text: &str) -> Result<()> {
    chat.say(
        &message.channel,
        &messages::mention(&message.sender_display_name, text),
    )
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

pub async fn handle_accounts(
    accounts: &[Account],
    chat: &impl ChatProvider,
    message: &ChatMessage,
) -> Result<()> {
    let entries: Vec<String> = accounts
        .iter()
        .enumerate()
        .map(|(i, account)| messages::account_entry(i + 1, &account.name, &account.id))
        .collect();

    tracing::info!(event = "accounts_command", "{} used accounts command", message.sender_login);
    chat.say(&message.channel, &messages::accounts_list(&entries))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

/// Why a `!setcurrent` argument could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    InvalidNumber,
    NotFound,
}

/// Numbers are 1-based roster positions; anything else is a case-insensitive name.
pub fn select_account(accounts: &[Account], arg: &str) -> Result<usize, SelectError> {
    if let Ok(position) = arg.parse::<i64>() {
        return usize::try_from(position)
            .ok()
            .filter(|p| (1..=accounts.len()).contains(p))
            .map(|p| p - 1)
            .ok_or(SelectError::InvalidNumber);
    }

    accounts
        .iter()
        .position(|account| account.name.eq_ignore_ascii_case(arg))
        .ok_or(SelectError::NotFound)
}

pub async fn handle_set_current(
    accounts: &[Account],
    registry: &CurrentAccountRegistry,
    chat: &impl ChatProvider,
    message: &ChatMessage,
    args: &str,
) -> Result<()> {
    if args.is_empty() {
        return reply_to(chat, message, messages::SET_CURRENT_USAGE).await;
    }

    let index = match select_account(accounts, args) {
        Ok(index) => index,
        Err(SelectError::InvalidNumber) => {
            return reply_to(chat, message, messages::INVALID_ACCOUNT_NUMBER).await;
        }
        Err(SelectError::NotFound) => {
            return reply_to(chat, message, messages::ACCOUNT_NOT_FOUND).await;
        }
    };

    let account = &accounts[index];
    if let Err(e) = registry.set(index).await {
        tracing::error!(event = "current_account_set", "{:#}", e);
        return reply_to(chat, message, messages::SET_ACCOUNT_FAILED).await;
    }

    tracing::info!(
        event = "set_current_command",
        "{} set current account to {}",
        message.sender_login,
        account.name
    );
    reply_to(chat, message, &messages::current_set(&account.name, &account.id)).await
}

pub async fn handle_current(
    accounts: &[Account],
    registry: &CurrentAccountRegistry,
    chat: &impl ChatProvider,
    message: &ChatMessage,
) -> Result<()> {
    let index = match registry.get().await {
        Ok(index) => index,
        Err(e) => {
            tracing::error!(event = "current_account_get", "{:#}", e);
            return reply_to(chat, message, messages::GET_ACCOUNT_FAILED).await;
        }
    };

    match accounts.get(index) {
        Some(account) => reply_to(chat, message, &messages::current_is(&account.name, &account.id)).await,
        None => reply_to(chat, message, messages::GET_ACCOUNT_FAILED).await,
    }
}

//! # Messages
//!
//! Contains constant strings and format functions for user-facing chat replies.

pub const RANK_ERROR: &str = "Error getting rank";
pub const HELLO: &str = "Hello";
pub const AUTH_DENIED: &str = "Only moderators can use that command";
pub const ACCOUNT_NOT_FOUND: &str = "Account not found";
pub const INVALID_ACCOUNT_NUMBER: &str = "Invalid account number";
pub const SET_CURRENT_USAGE: &str = "Usage: !setcurrent <name or number>";
pub const SET_ACCOUNT_FAILED: &str = "Error setting account";
pub const GET_ACCOUNT_FAILED: &str = "Error getting current account";

/// Addresses a reply to a chat user.
pub fn mention(user: &str, text: &str) -> String {
    format!("@{user}: {text}")
}

pub fn account_label(name: &str, id: &str) -> String {
    format!("{name} ({id})")
}

pub fn accounts_list(entries: &[String]) -> String {
    format!("Accounts: {}", entries.join(", "))
}

pub fn account_entry(position: usize, name: &str, id: &str) -> String {
    format!("{position}. {}", account_label(name, id))
}

pub fn current_set(name: &str, id: &str) -> String {
    format!("Current account set to {}", account_label(name, id))
}

pub fn current_is(name: &str, id: &str) -> String {
    format!("Current account is {}", account_label(name, id))
}

//! # Reply Formatter
//!
//! Renders a [`RankSummary`] according to an account's stat preferences.

use crate::domain::types::{Account, RankSummary, StatKey};

fn stat_value(summary: &RankSummary, key: StatKey) -> String {
    match key {
        StatKey::Rank => summary.rank.clone(),
        StatKey::Elo => summary.elo.to_string(),
        StatKey::Rr => summary.rr.to_string(),
        StatKey::WinRate => summary.win_rate.clone(),
        StatKey::Change => summary.change.to_string(),
        StatKey::Kills => summary.kills.clone(),
    }
}

/// `<id>: <Label>: <value> | ...`, in configured order. Unknown keys are skipped.
pub fn render(summary: &RankSummary, account: &Account) -> String {
    let keys: Vec<StatKey> = if account.stats.is_empty() {
        StatKey::DEFAULT_SET.to_vec()
    } else {
        account.stats.iter().filter_map(|k| StatKey::parse(k)).collect()
    };

    let stats: Vec<String> = keys
        .into_iter()
        .map(|key| format!("{}: {}", key.label(), stat_value(summary, key)))
        .collect();

    format!("{}: {}", account.id, stats.join(" | "))
}

//! # Domain Errors
//!
//! Failure taxonomy of the primary stats API. Secondary-source failures are not errors;
//! they collapse to [`crate::domain::types::KILLS_UNKNOWN`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// Upstream confirmed there is no such player.
    #[error("Player not found")]
    PlayerNotFound,
    /// Network, timeout, unexpected status or decode failure. Never retried.
    #[error("Stats request failed: {0}")]
    Transient(String),
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transient(err.to_string())
    }
}

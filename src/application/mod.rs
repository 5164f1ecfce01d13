//! # Application Layer
//!
//! Contains the core rank pipeline and orchestration of the bot:
//! command routing, the summary cache, the current-account pointer and reply rendering.

pub mod formatter;
pub mod rank_cache;
pub mod ranks;
pub mod registry;
pub mod router;

#[cfg(test)]
pub mod test_support;

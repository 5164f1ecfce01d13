//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, CacheStore,
//! RankSource, KillsSource).

pub mod cache;
pub mod logging;
pub mod stats;
pub mod tracker;
pub mod twitch;

//! # Domain Layer
//!
//! Core definitions, types, and traits that define the business domain of the bot.
//! Independent of the chat transport, cache backend and HTTP stack, serving as the
//! contract for the other layers.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;

//! # Interface Layer
//!
//! Chat-facing command handlers invoked by the application router.

pub mod commands;

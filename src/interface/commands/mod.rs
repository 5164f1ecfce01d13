//! # Command Handlers
//!
//! Contains specific handler functions for each supported chat command
//! (e.g., !rank, !setcurrent, !accounts). These handlers are invoked by the Router.

pub mod accounts;
pub mod misc;
pub mod rank;

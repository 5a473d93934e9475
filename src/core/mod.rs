//! # Core
//!
//! Domain logic with no presentation concerns:
//!
//! - `state` — the conversation session and its data types
//! - `action` — the `update(session, action) -> Effect` state machine
//! - `config` — settings loading and resolution
//!
//! The TUI layer drives this module and performs the I/O that `Effect`
//! values describe. Nothing in here touches the terminal.

pub mod action;
pub mod config;
pub mod state;

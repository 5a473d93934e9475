//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::catalog::builtin::builtin_models;
use crate::core::action::{Action, update};
use crate::core::state::Session;

/// Creates a session with the built-in model catalog already loaded,
/// defaulted to the first entry ("gpt-4").
pub fn loaded_session() -> Session {
    let mut session = Session::new(None);
    update(&mut session, Action::ModelsLoaded(builtin_models()));
    session
}

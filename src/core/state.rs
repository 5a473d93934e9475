//! # Session State
//!
//! Core business state for Parley. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! Session
//! ├── sequence_number: u32          // conversation counter, starts at 1
//! ├── active_model_id: String       // "" until the catalog loads
//! ├── messages: Vec<Message>        // append-only conversation history
//! ├── parameters: GenerationParameters
//! ├── is_loading: bool              // a mock reply is in flight
//! ├── generation: u64               // bumped on every reset; stale replies are dropped
//! ├── models / templates            // catalogs, empty until fetched
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::{DateTime, Utc};

use crate::catalog::{ModelDescriptor, PromptTemplate};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One exchanged chat message. Created append-only; never mutated after
/// creation; destroyed only when the session resets.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Unique within one session.
    pub id: String,
    pub role: Role,
    pub content: String,
    /// The model active when this message was created.
    pub model_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: String, model_id: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            model_id,
            created_at: Utc::now(),
        }
    }
}

/// A tunable generation parameter, used by the parameter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Temperature,
    MaxTokens,
    TopP,
}

/// Sampling knobs. Adjustable at any time; changes never retroactively
/// affect past messages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParameters {
    /// In `[0.0, 2.0]`.
    pub temperature: f32,
    /// In `[1, 4000]`.
    pub max_tokens: u32,
    /// In `[0.0, 1.0]`.
    pub top_p: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            top_p: 1.0,
        }
    }
}

impl GenerationParameters {
    /// Nudge one field up or down by its step, clamped to its range.
    /// Steps mirror the original slider granularity (0.1 / 100 / 0.1).
    pub fn nudge(&mut self, field: ParamField, increase: bool) {
        match field {
            ParamField::Temperature => {
                let delta = if increase { 0.1 } else { -0.1 };
                self.temperature = (self.temperature + delta).clamp(0.0, 2.0);
            }
            ParamField::MaxTokens => {
                self.max_tokens = if increase {
                    (self.max_tokens + 100).min(4000)
                } else {
                    self.max_tokens.saturating_sub(100).max(1)
                };
            }
            ParamField::TopP => {
                let delta = if increase { 0.1 } else { -0.1 };
                self.top_p = (self.top_p + delta).clamp(0.0, 1.0);
            }
        }
    }
}

pub struct Session {
    /// Conversation counter. Starts at 1, only ever increments.
    pub sequence_number: u32,
    /// One of the catalog ids once loaded, or "" before the catalog loads.
    pub active_model_id: String,
    pub messages: Vec<Message>,
    pub parameters: GenerationParameters,
    /// True while a mock reply is in flight (AwaitingResponse state).
    pub is_loading: bool,
    /// Bumped on every reset. A reply tagged with an older generation
    /// resolved after a reset and must not be appended.
    pub generation: u64,
    pub models: Vec<ModelDescriptor>,
    /// True until the model catalog fetch settles (success or failure).
    pub models_loading: bool,
    pub templates: Vec<PromptTemplate>,
    pub status_message: String,
}

impl Session {
    pub fn new(default_model: Option<String>) -> Self {
        Self {
            sequence_number: 1,
            active_model_id: default_model.unwrap_or_default(),
            messages: Vec::new(),
            parameters: GenerationParameters::default(),
            is_loading: false,
            generation: 0,
            models: Vec::new(),
            models_loading: true,
            templates: Vec::new(),
            status_message: String::from("Welcome to Parley!"),
        }
    }

    /// The descriptor for the active model, once the catalog has loaded.
    pub fn active_model(&self) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.id == self.active_model_id)
    }

    /// Clear messages and start the next numbered conversation. The only
    /// destructive transition: increments `sequence_number` by exactly 1
    /// and invalidates any in-flight reply via `generation`.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.sequence_number += 1;
        self.generation += 1;
        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_new_defaults() {
        let session = Session::new(None);
        assert_eq!(session.sequence_number, 1);
        assert_eq!(session.active_model_id, "");
        assert!(session.messages.is_empty());
        assert!(!session.is_loading);
        assert!(session.models_loading);
        assert_eq!(session.status_message, "Welcome to Parley!");
    }

    #[test]
    fn test_reset_increments_sequence_and_generation() {
        let mut session = Session::new(Some("gpt-4".to_string()));
        session
            .messages
            .push(Message::new(Role::User, "hi".to_string(), None));
        session.is_loading = true;

        session.reset();
        assert!(session.messages.is_empty());
        assert_eq!(session.sequence_number, 2);
        assert_eq!(session.generation, 1);
        assert!(!session.is_loading);

        session.reset();
        assert_eq!(session.sequence_number, 3);
    }

    #[test]
    fn test_parameters_clamp_at_bounds() {
        let mut params = GenerationParameters::default();

        for _ in 0..40 {
            params.nudge(ParamField::Temperature, true);
        }
        assert!(params.temperature <= 2.0);

        for _ in 0..40 {
            params.nudge(ParamField::Temperature, false);
        }
        assert!(params.temperature >= 0.0);

        for _ in 0..60 {
            params.nudge(ParamField::MaxTokens, false);
        }
        assert_eq!(params.max_tokens, 1);

        for _ in 0..60 {
            params.nudge(ParamField::MaxTokens, true);
        }
        assert_eq!(params.max_tokens, 4000);

        for _ in 0..20 {
            params.nudge(ParamField::TopP, true);
        }
        assert!(params.top_p <= 1.0);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::new(Role::User, "one".to_string(), None);
        let b = Message::new(Role::User, "two".to_string(), None);
        assert_ne!(a.id, b.id);
    }
}

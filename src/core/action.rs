//! # Actions
//!
//! Everything that can happen in Parley becomes an `Action`.
//! User submits the draft? That's `Action::SubmitPrompt`.
//! The mock responder finishes? That's `Action::ReplyArrived`.
//!
//! The `update()` function takes the current session and an action, mutates
//! the session, and returns an `Effect` describing any I/O the caller must
//! perform. No side effects happen inside `update()` itself.
//!
//! ```text
//! Session + Action  →  update()  →  mutated Session + Effect
//! ```
//!
//! This makes the whole conversation state machine testable without a
//! terminal or a timer in sight.

use log::{info, warn};

use crate::catalog::{ModelDescriptor, PromptTemplate};
use crate::core::state::{Message, ParamField, Role, Session};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Model catalog fetch settled.
    ModelsLoaded(Vec<ModelDescriptor>),
    ModelsFailed(String),
    /// Template catalog fetch settled.
    TemplatesLoaded(Vec<PromptTemplate>),
    TemplatesFailed(String),
    /// User picked a model in the model picker.
    SelectModel(String),
    /// Explicit "new chat".
    NewConversation,
    /// User submitted the draft.
    SubmitPrompt(String),
    /// The mock responder finished. `generation` is the session generation
    /// captured when the reply was spawned.
    ReplyArrived {
        content: String,
        model_id: String,
        generation: u64,
    },
    /// User picked a template: its parameter preset applies to the session,
    /// its prompt text replaces the draft (via `Effect::LoadDraft`).
    ApplyTemplate(PromptTemplate),
    AdjustParameter {
        field: ParamField,
        increase: bool,
    },
    Quit,
}

/// I/O the event loop must perform after an `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Spawn a mock reply task for the given prompt.
    SpawnReply {
        prompt: String,
        model_id: String,
        generation: u64,
    },
    /// Discard the input box draft.
    ClearDraft,
    /// Replace the input box draft with this text.
    LoadDraft(String),
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::ModelsLoaded(models) => {
            session.models_loading = false;
            // The active id must be one of the catalog ids once loaded.
            // Falls back to the first entry when nothing is selected yet or
            // the configured default names an id the catalog doesn't have.
            if !models.iter().any(|m| m.id == session.active_model_id) {
                if !session.active_model_id.is_empty() {
                    warn!(
                        "Configured model '{}' is not in the catalog",
                        session.active_model_id
                    );
                }
                if let Some(first) = models.first() {
                    session.active_model_id = first.id.clone();
                }
            }
            info!("Model catalog loaded: {} entries", models.len());
            session.models = models;
            Effect::None
        }
        Action::ModelsFailed(err) => {
            session.models_loading = false;
            warn!("Failed to fetch model catalog: {}", err);
            session.status_message = String::from("Model catalog unavailable");
            Effect::None
        }
        Action::TemplatesLoaded(templates) => {
            info!("Template catalog loaded: {} entries", templates.len());
            session.templates = templates;
            Effect::None
        }
        Action::TemplatesFailed(err) => {
            // Editing continues without templates.
            warn!("Failed to fetch template catalog: {}", err);
            Effect::None
        }
        Action::SelectModel(id) => {
            if id == session.active_model_id {
                return Effect::None;
            }
            if session.messages.is_empty() {
                // Nothing to discard: switch in place, no sequence bump.
                session.active_model_id = id;
                return Effect::None;
            }
            // Switching mid-conversation discards context: the canned text is
            // model-specific and mixing models in one thread is incoherent.
            session.reset();
            session.active_model_id = id;
            session.status_message = format!("Conversation #{}", session.sequence_number);
            Effect::ClearDraft
        }
        Action::NewConversation => {
            session.reset();
            session.status_message = format!("Conversation #{}", session.sequence_number);
            Effect::ClearDraft
        }
        Action::SubmitPrompt(text) => {
            if text.trim().is_empty() || session.is_loading {
                return Effect::None;
            }
            let model_id = session.active_model_id.clone();
            session.messages.push(Message::new(
                Role::User,
                text.clone(),
                Some(model_id.clone()),
            ));
            session.is_loading = true;
            Effect::SpawnReply {
                prompt: text,
                model_id,
                generation: session.generation,
            }
        }
        Action::ReplyArrived {
            content,
            model_id,
            generation,
        } => {
            if generation != session.generation {
                // The conversation was reset while this reply was in flight.
                warn!(
                    "Dropping stale reply (generation {} != {})",
                    generation, session.generation
                );
                return Effect::None;
            }
            session
                .messages
                .push(Message::new(Role::Assistant, content, Some(model_id)));
            session.is_loading = false;
            Effect::None
        }
        Action::ApplyTemplate(template) => {
            session.parameters.temperature = template.parameters.temperature;
            session.parameters.max_tokens = template.parameters.max_tokens;
            session.parameters.top_p = template.parameters.top_p;
            session.status_message = format!("Template: {}", template.name);
            Effect::LoadDraft(template.prompt)
        }
        Action::AdjustParameter { field, increase } => {
            session.parameters.nudge(field, increase);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::{builtin_models, builtin_templates};
    use crate::responder::reply_for;
    use crate::test_support::loaded_session;

    fn submit(session: &mut Session, text: &str) -> Effect {
        update(session, Action::SubmitPrompt(text.to_string()))
    }

    /// Drives a full send/reply exchange the way the event loop would.
    fn exchange(session: &mut Session, text: &str) {
        let effect = submit(session, text);
        let Effect::SpawnReply {
            prompt,
            model_id,
            generation,
        } = effect
        else {
            panic!("Expected SpawnReply, got {:?}", effect);
        };
        let effect = update(
            session,
            Action::ReplyArrived {
                content: reply_for(&model_id, &prompt),
                model_id,
                generation,
            },
        );
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_models_loaded_defaults_to_first_entry() {
        let mut session = Session::new(None);
        update(&mut session, Action::ModelsLoaded(builtin_models()));
        assert_eq!(session.active_model_id, "gpt-4");
        assert!(!session.models_loading);
    }

    #[test]
    fn test_models_loaded_keeps_existing_selection() {
        let mut session = Session::new(Some("claude-3-haiku".to_string()));
        update(&mut session, Action::ModelsLoaded(builtin_models()));
        assert_eq!(session.active_model_id, "claude-3-haiku");
    }

    #[test]
    fn test_models_loaded_replaces_unknown_default_model() {
        let mut session = Session::new(Some("gpt4".to_string()));
        update(&mut session, Action::ModelsLoaded(builtin_models()));
        assert_eq!(session.active_model_id, "gpt-4");
        assert!(session.active_model().is_some());
    }

    #[test]
    fn test_models_failed_leaves_selector_empty() {
        let mut session = Session::new(None);
        let effect = update(
            &mut session,
            Action::ModelsFailed("connection refused".to_string()),
        );
        assert_eq!(effect, Effect::None);
        assert!(session.models.is_empty());
        assert!(!session.models_loading);
        assert_eq!(session.active_model_id, "");
    }

    #[test]
    fn test_empty_prompt_is_rejected_silently() {
        let mut session = loaded_session();
        assert_eq!(submit(&mut session, ""), Effect::None);
        assert_eq!(submit(&mut session, "   \n\t  "), Effect::None);
        assert!(session.messages.is_empty());
        assert!(!session.is_loading);
    }

    #[test]
    fn test_submit_while_loading_is_rejected() {
        let mut session = loaded_session();
        assert!(matches!(
            submit(&mut session, "first"),
            Effect::SpawnReply { .. }
        ));
        assert_eq!(submit(&mut session, "second"), Effect::None);
        assert_eq!(session.messages.len(), 1);
    }

    #[test]
    fn test_submit_appends_user_message_and_awaits() {
        let mut session = loaded_session();
        let effect = submit(&mut session, "hello");

        assert_eq!(session.messages.len(), 1);
        let msg = &session.messages[0];
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
        assert_eq!(msg.model_id.as_deref(), Some("gpt-4"));
        assert!(session.is_loading);
        assert_eq!(
            effect,
            Effect::SpawnReply {
                prompt: "hello".to_string(),
                model_id: "gpt-4".to_string(),
                generation: 0,
            }
        );
    }

    #[test]
    fn test_hello_scenario_uses_non_code_branch() {
        let mut session = loaded_session();
        exchange(&mut session, "hello");

        assert_eq!(session.messages.len(), 2);
        let reply = &session.messages[1];
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.model_id.as_deref(), Some("gpt-4"));
        assert!(reply.content.contains("Let me provide a detailed response:"));
        assert!(!session.is_loading);
    }

    #[test]
    fn test_two_sends_strictly_alternate() {
        let mut session = loaded_session();
        exchange(&mut session, "first question");
        exchange(&mut session, "second question");

        assert_eq!(session.messages.len(), 4);
        let roles: Vec<Role> = session.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        for msg in &session.messages {
            assert_eq!(msg.model_id.as_deref(), Some("gpt-4"));
        }
    }

    #[test]
    fn test_new_conversation_clears_and_increments() {
        let mut session = loaded_session();
        exchange(&mut session, "hello");
        let before = session.sequence_number;

        let effect = update(&mut session, Action::NewConversation);
        assert_eq!(effect, Effect::ClearDraft);
        assert!(session.messages.is_empty());
        assert!(session.sequence_number > before);
    }

    #[test]
    fn test_model_switch_with_history_resets() {
        let mut session = loaded_session();
        exchange(&mut session, "hello");

        let effect = update(
            &mut session,
            Action::SelectModel("claude-3-sonnet".to_string()),
        );
        assert_eq!(effect, Effect::ClearDraft);
        assert!(session.messages.is_empty());
        assert_eq!(session.sequence_number, 2);
        assert_eq!(session.active_model_id, "claude-3-sonnet");
    }

    #[test]
    fn test_model_switch_without_history_is_free() {
        let mut session = loaded_session();
        let effect = update(
            &mut session,
            Action::SelectModel("gemini-pro".to_string()),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(session.sequence_number, 1);
        assert_eq!(session.active_model_id, "gemini-pro");
    }

    #[test]
    fn test_reselecting_active_model_is_a_noop() {
        let mut session = loaded_session();
        exchange(&mut session, "hello");
        let effect = update(&mut session, Action::SelectModel("gpt-4".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.sequence_number, 1);
    }

    #[test]
    fn test_stale_reply_after_reset_is_dropped() {
        let mut session = loaded_session();
        let Effect::SpawnReply {
            prompt,
            model_id,
            generation,
        } = submit(&mut session, "hello")
        else {
            panic!("Expected SpawnReply");
        };

        // Reset while the reply is still in flight.
        update(&mut session, Action::NewConversation);
        assert!(session.messages.is_empty());

        let effect = update(
            &mut session,
            Action::ReplyArrived {
                content: reply_for(&model_id, &prompt),
                model_id,
                generation,
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(session.messages.is_empty());
        assert!(!session.is_loading);
    }

    #[test]
    fn test_every_catalog_model_tags_its_reply() {
        for descriptor in builtin_models() {
            let mut session = Session::new(None);
            update(&mut session, Action::ModelsLoaded(builtin_models()));
            update(&mut session, Action::SelectModel(descriptor.id.clone()));
            exchange(&mut session, "try this prompt");

            assert_eq!(session.messages.len(), 2);
            assert_eq!(
                session.messages[1].model_id.as_deref(),
                Some(descriptor.id.as_str())
            );
        }
    }

    #[test]
    fn test_apply_template_loads_draft_and_presets() {
        let mut session = loaded_session();
        let template = builtin_templates()
            .into_iter()
            .find(|t| t.id == "code-reviewer")
            .unwrap();
        let prompt = template.prompt.clone();

        let effect = update(&mut session, Action::ApplyTemplate(template));
        assert_eq!(effect, Effect::LoadDraft(prompt));
        assert_eq!(session.parameters.temperature, 0.3);
        assert_eq!(session.parameters.max_tokens, 1500);
        assert_eq!(session.parameters.top_p, 0.8);
    }

    #[test]
    fn test_adjust_parameter_nudges_and_clamps() {
        let mut session = loaded_session();
        update(
            &mut session,
            Action::AdjustParameter {
                field: ParamField::MaxTokens,
                increase: true,
            },
        );
        assert_eq!(session.parameters.max_tokens, 1100);
    }
}

//! # TUI Shell
//!
//! Owns the terminal, the event loop, and the wiring between input events,
//! the session state machine, and background tasks.
//!
//! ## Data flow
//!
//! ```text
//! crossterm event ──▶ TuiEvent ──▶ overlay / input box / chord routing
//!                                        │
//!                                     Action
//!                                        │
//!                        update(session, action) ──▶ Effect
//!                                        │
//!                     tokio task ──(mpsc)──▶ Action (catalog, replies)
//! ```
//!
//! Background tasks never touch the session; they send Actions back over the
//! channel and the loop applies them between frames.

pub mod component;
pub mod components;
pub mod event;
pub mod theme;
pub mod ui;

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use log::{error, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::catalog::{
    BuiltinCatalogProvider, CatalogProvider, HttpCatalogProvider,
};
use crate::core::action::{Action, Effect, update};
use crate::core::config::{CatalogSource, ResolvedConfig, ThemeKind};
use crate::core::state::Session;
use crate::responder;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    InputBox, InputEvent, MessageListState, ModelPickerEvent, ModelPickerState, ParamPanelEvent,
    ParamPanelState, TemplatePickerEvent, TemplatePickerState,
};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Frame interval while a spinner or pending fetch is animating.
const ANIMATION_TICK: Duration = Duration::from_millis(80);
/// Poll interval when the screen is static.
const IDLE_TICK: Duration = Duration::from_millis(250);

/// The active modal overlay, if any. At most one is open; it captures all
/// key events until it selects or dismisses.
pub enum Overlay {
    None,
    ModelPicker(ModelPickerState),
    TemplatePicker(TemplatePickerState),
    ParamPanel(ParamPanelState),
}

/// UI state that persists across frames but is not part of the session.
pub struct TuiState {
    pub theme: Theme,
    pub input_box: InputBox,
    pub message_list: MessageListState,
    pub overlay: Overlay,
}

impl TuiState {
    pub fn new(kind: ThemeKind) -> Self {
        let theme = Theme::new(kind);
        Self {
            theme,
            input_box: InputBox::new(theme),
            message_list: MessageListState::new(),
            overlay: Overlay::None,
        }
    }
}

/// RAII guard for terminal modes. Restores the terminal on drop, including
/// the panic path.
struct TerminalModeGuard {
    keyboard_enhanced: bool,
}

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            EnableMouseCapture
        )?;
        // Without the Kitty protocol Ctrl+Enter is indistinguishable from
        // Enter; those terminals fall back to Ctrl+J for submit.
        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

fn build_provider(config: &ResolvedConfig) -> Arc<dyn CatalogProvider> {
    match config.catalog_source {
        CatalogSource::Builtin => Arc::new(BuiltinCatalogProvider::new()),
        CatalogSource::Http => {
            Arc::new(HttpCatalogProvider::new(config.catalog_base_url.clone()))
        }
    }
}

/// Kick off both one-shot catalog fetches. Failures become Actions; the
/// session decides how to degrade.
fn spawn_catalog_fetches(provider: Arc<dyn CatalogProvider>, tx: Sender<Action>) {
    info!("Fetching catalogs from '{}' provider", provider.name());

    let models_provider = Arc::clone(&provider);
    let models_tx = tx.clone();
    tokio::spawn(async move {
        let action = match models_provider.fetch_models().await {
            Ok(models) => Action::ModelsLoaded(models),
            Err(e) => Action::ModelsFailed(e.to_string()),
        };
        let _ = models_tx.send(action);
    });

    tokio::spawn(async move {
        let action = match provider.fetch_templates().await {
            Ok(templates) => Action::TemplatesLoaded(templates),
            Err(e) => Action::TemplatesFailed(e.to_string()),
        };
        let _ = tx.send(action);
    });
}

/// Produce a canned reply after the simulated inference delay. The captured
/// generation lets the state machine drop the reply if the conversation was
/// reset in the meantime.
fn spawn_reply(prompt: String, model_id: String, generation: u64, tx: Sender<Action>) {
    tokio::spawn(async move {
        tokio::time::sleep(responder::reply_delay()).await;
        let content = responder::reply_for(&model_id, &prompt);
        let _ = tx.send(Action::ReplyArrived {
            content,
            model_id,
            generation,
        });
    });
}

/// Apply one Action from the background channel. A picker opened before its
/// catalog fetch settled holds an empty snapshot; re-seed it when the data
/// arrives so the user is not stuck on the unavailable placeholder.
fn apply_action(
    action: Action,
    session: &mut Session,
    tui: &mut TuiState,
    tx: &Sender<Action>,
    should_quit: &mut bool,
) {
    let models_arrived = matches!(action, Action::ModelsLoaded(_));
    let templates_arrived = matches!(action, Action::TemplatesLoaded(_));

    let effect = update(session, action);
    apply_effect(effect, tui, tx, should_quit);

    if models_arrived && matches!(tui.overlay, Overlay::ModelPicker(_)) {
        tui.overlay = Overlay::ModelPicker(ModelPickerState::new(session.models.clone()));
    }
    if templates_arrived && matches!(tui.overlay, Overlay::TemplatePicker(_)) {
        tui.overlay =
            Overlay::TemplatePicker(TemplatePickerState::new(session.templates.clone()));
    }
}

fn apply_effect(effect: Effect, tui: &mut TuiState, tx: &Sender<Action>, should_quit: &mut bool) {
    match effect {
        Effect::None => {}
        Effect::SpawnReply {
            prompt,
            model_id,
            generation,
        } => spawn_reply(prompt, model_id, generation, tx.clone()),
        Effect::ClearDraft => tui.input_box.clear(),
        Effect::LoadDraft(text) => tui.input_box.load_draft(text),
        Effect::Quit => *should_quit = true,
    }
}

/// Route one TuiEvent. Returns true if the screen needs a redraw.
fn handle_tui_event(
    event: &TuiEvent,
    session: &mut Session,
    tui: &mut TuiState,
    tx: &Sender<Action>,
    should_quit: &mut bool,
) -> bool {
    match event {
        TuiEvent::ForceQuit => {
            let effect = update(session, Action::Quit);
            apply_effect(effect, tui, tx, should_quit);
            return true;
        }
        TuiEvent::Resize => return true,
        TuiEvent::ToggleTheme => {
            tui.theme.toggle();
            return true;
        }
        _ => {}
    }

    // An open overlay captures everything else.
    match std::mem::replace(&mut tui.overlay, Overlay::None) {
        Overlay::ModelPicker(mut state) => {
            match state.handle_event(event) {
                Some(ModelPickerEvent::Select(id)) => {
                    let effect = update(session, Action::SelectModel(id));
                    apply_effect(effect, tui, tx, should_quit);
                }
                Some(ModelPickerEvent::Dismiss) => {}
                None => tui.overlay = Overlay::ModelPicker(state),
            }
            return true;
        }
        Overlay::TemplatePicker(mut state) => {
            match state.handle_event(event) {
                Some(TemplatePickerEvent::Select(template)) => {
                    let effect = update(session, Action::ApplyTemplate(template));
                    apply_effect(effect, tui, tx, should_quit);
                }
                Some(TemplatePickerEvent::Dismiss) => {}
                None => tui.overlay = Overlay::TemplatePicker(state),
            }
            return true;
        }
        Overlay::ParamPanel(mut state) => {
            match state.handle_event(event) {
                Some(ParamPanelEvent::Adjust { field, increase }) => {
                    let effect = update(session, Action::AdjustParameter { field, increase });
                    apply_effect(effect, tui, tx, should_quit);
                    // Adjusting keeps the panel open.
                    tui.overlay = Overlay::ParamPanel(state);
                }
                Some(ParamPanelEvent::Dismiss) => {}
                None => tui.overlay = Overlay::ParamPanel(state),
            }
            return true;
        }
        Overlay::None => {}
    }

    match event {
        TuiEvent::OpenModelPicker => {
            tui.overlay = Overlay::ModelPicker(ModelPickerState::new(session.models.clone()));
            true
        }
        TuiEvent::OpenTemplatePicker => {
            tui.overlay =
                Overlay::TemplatePicker(TemplatePickerState::new(session.templates.clone()));
            true
        }
        TuiEvent::OpenParamPanel => {
            tui.overlay = Overlay::ParamPanel(ParamPanelState::new());
            true
        }
        TuiEvent::NewConversation => {
            let effect = update(session, Action::NewConversation);
            apply_effect(effect, tui, tx, should_quit);
            true
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => tui.message_list.handle_event(event).is_some(),
        // While a reply is in flight the submit chord is inert; routing it
        // into the input box would destroy the draft.
        TuiEvent::Submit if session.is_loading => false,
        TuiEvent::Escape => false,
        other => match tui.input_box.handle_event(other) {
            Some(InputEvent::Submit(text)) => {
                let effect = update(session, Action::SubmitPrompt(text));
                apply_effect(effect, tui, tx, should_quit);
                true
            }
            Some(InputEvent::ContentChanged) => true,
            None => false,
        },
    }
}

/// Run the TUI until the user quits.
pub async fn run(config: &ResolvedConfig) -> io::Result<()> {
    let (tx, rx): (Sender<Action>, Receiver<Action>) = std::sync::mpsc::channel();

    spawn_catalog_fetches(build_provider(config), tx.clone());

    let mut session = Session::new(config.default_model.clone());
    let mut tui = TuiState::new(config.theme);

    let _guard = TerminalModeGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut should_quit = false;
    let mut dirty = true;
    let mut spinner_frame = 0usize;

    while !should_quit {
        // Apply everything the background tasks sent since the last frame.
        while let Ok(action) = rx.try_recv() {
            apply_action(action, &mut session, &mut tui, &tx, &mut should_quit);
            dirty = true;
        }

        let animating = session.is_loading || session.models_loading;
        if dirty || animating {
            if animating {
                spinner_frame = spinner_frame.wrapping_add(1);
            }
            terminal.draw(|f| ui::draw_ui(f, &session, &mut tui, spinner_frame))?;
            dirty = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        if let Some(ev) = event::poll_event_timeout(timeout) {
            if handle_tui_event(&ev, &mut session, &mut tui, &tx, &mut should_quit) {
                dirty = true;
            }
            // Drain any queued input before redrawing (fast typing, paste).
            while let Some(ev) = event::poll_event_immediate() {
                if handle_tui_event(&ev, &mut session, &mut tui, &tx, &mut should_quit) {
                    dirty = true;
                }
            }
        }
    }

    if let Err(e) = terminal.clear() {
        error!("Failed to clear terminal on exit: {}", e);
    }
    info!("Parley exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::loaded_session;

    fn harness() -> (Session, TuiState, Sender<Action>, Receiver<Action>, bool) {
        let (tx, rx) = std::sync::mpsc::channel();
        (loaded_session(), TuiState::new(ThemeKind::Dark), tx, rx, false)
    }

    fn send(
        event: TuiEvent,
        session: &mut Session,
        tui: &mut TuiState,
        tx: &Sender<Action>,
        quit: &mut bool,
    ) -> bool {
        handle_tui_event(&event, session, tui, tx, quit)
    }

    #[test]
    fn test_chord_opens_picker_and_escape_closes_it() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();

        send(TuiEvent::OpenModelPicker, &mut session, &mut tui, &tx, &mut quit);
        assert!(matches!(tui.overlay, Overlay::ModelPicker(_)));

        send(TuiEvent::Escape, &mut session, &mut tui, &tx, &mut quit);
        assert!(matches!(tui.overlay, Overlay::None));
    }

    #[test]
    fn test_picker_selection_switches_model() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();

        send(TuiEvent::OpenModelPicker, &mut session, &mut tui, &tx, &mut quit);
        send(TuiEvent::CursorDown, &mut session, &mut tui, &tx, &mut quit);
        send(TuiEvent::Submit, &mut session, &mut tui, &tx, &mut quit);

        assert!(matches!(tui.overlay, Overlay::None));
        assert_eq!(session.active_model_id, "gpt-3.5-turbo");
    }

    #[test]
    fn test_typing_goes_to_input_box_when_no_overlay() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();
        send(TuiEvent::InputChar('h'), &mut session, &mut tui, &tx, &mut quit);
        send(TuiEvent::InputChar('i'), &mut session, &mut tui, &tx, &mut quit);
        assert_eq!(tui.input_box.buffer, "hi");
    }

    #[test]
    fn test_typing_is_captured_by_open_overlay() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();
        send(TuiEvent::OpenParamPanel, &mut session, &mut tui, &tx, &mut quit);
        send(TuiEvent::InputChar('x'), &mut session, &mut tui, &tx, &mut quit);
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn test_param_panel_adjust_keeps_panel_open() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();
        send(TuiEvent::OpenParamPanel, &mut session, &mut tui, &tx, &mut quit);
        send(TuiEvent::CursorRight, &mut session, &mut tui, &tx, &mut quit);
        assert!(matches!(tui.overlay, Overlay::ParamPanel(_)));
        assert!((session.parameters.temperature - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_template_selection_applies_preset_and_loads_draft() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();
        update(
            &mut session,
            Action::TemplatesLoaded(crate::catalog::builtin::builtin_templates()),
        );

        send(TuiEvent::OpenTemplatePicker, &mut session, &mut tui, &tx, &mut quit);
        send(TuiEvent::CursorDown, &mut session, &mut tui, &tx, &mut quit);
        send(TuiEvent::Submit, &mut session, &mut tui, &tx, &mut quit);

        assert!(matches!(tui.overlay, Overlay::None));
        assert!(tui.input_box.buffer.contains("code reviewer"));
        assert_eq!(session.parameters.max_tokens, 1500);
    }

    #[tokio::test]
    async fn test_submit_while_loading_preserves_draft() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();
        session.is_loading = true;

        send(TuiEvent::InputChar('a'), &mut session, &mut tui, &tx, &mut quit);
        let dirty = send(TuiEvent::Submit, &mut session, &mut tui, &tx, &mut quit);

        assert!(!dirty);
        assert_eq!(tui.input_box.buffer, "a");
        assert_eq!(session.messages.len(), 0);
    }

    #[tokio::test]
    async fn test_submit_spawns_reply_and_clears_editor() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();

        for c in "hello".chars() {
            send(TuiEvent::InputChar(c), &mut session, &mut tui, &tx, &mut quit);
        }
        send(TuiEvent::Submit, &mut session, &mut tui, &tx, &mut quit);

        assert!(tui.input_box.buffer.is_empty());
        assert!(session.is_loading);
        assert_eq!(session.messages.len(), 1);
    }

    #[test]
    fn test_picker_opened_during_fetch_refreshes_on_arrival() {
        let (tx, _rx) = std::sync::mpsc::channel();
        let mut session = Session::new(None);
        let mut tui = TuiState::new(ThemeKind::Dark);
        let mut quit = false;

        // Catalog still pending: the picker snapshot is empty.
        send(TuiEvent::OpenModelPicker, &mut session, &mut tui, &tx, &mut quit);
        match &tui.overlay {
            Overlay::ModelPicker(state) => assert!(state.models.is_empty()),
            _ => panic!("Expected model picker"),
        }

        apply_action(
            Action::ModelsLoaded(crate::catalog::builtin::builtin_models()),
            &mut session,
            &mut tui,
            &tx,
            &mut quit,
        );

        match &tui.overlay {
            Overlay::ModelPicker(state) => assert_eq!(state.models.len(), 5),
            _ => panic!("Expected model picker to stay open"),
        }
    }

    #[test]
    fn test_template_picker_refreshes_on_arrival() {
        let (tx, _rx) = std::sync::mpsc::channel();
        let mut session = Session::new(None);
        let mut tui = TuiState::new(ThemeKind::Dark);
        let mut quit = false;

        send(TuiEvent::OpenTemplatePicker, &mut session, &mut tui, &tx, &mut quit);
        apply_action(
            Action::TemplatesLoaded(crate::catalog::builtin::builtin_templates()),
            &mut session,
            &mut tui,
            &tx,
            &mut quit,
        );

        match &tui.overlay {
            Overlay::TemplatePicker(state) => assert_eq!(state.templates.len(), 5),
            _ => panic!("Expected template picker to stay open"),
        }
    }

    #[test]
    fn test_catalog_arrival_leaves_other_overlays_alone() {
        let (tx, _rx) = std::sync::mpsc::channel();
        let mut session = Session::new(None);
        let mut tui = TuiState::new(ThemeKind::Dark);
        let mut quit = false;

        send(TuiEvent::OpenParamPanel, &mut session, &mut tui, &tx, &mut quit);
        apply_action(
            Action::ModelsLoaded(crate::catalog::builtin::builtin_models()),
            &mut session,
            &mut tui,
            &tx,
            &mut quit,
        );
        assert!(matches!(tui.overlay, Overlay::ParamPanel(_)));
    }

    #[test]
    fn test_force_quit_sets_flag() {
        let (mut session, mut tui, tx, _rx, mut quit) = harness();
        send(TuiEvent::ForceQuit, &mut session, &mut tui, &tx, &mut quit);
        assert!(quit);
    }
}

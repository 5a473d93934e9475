use ratatui::Frame;
use ratatui::layout::Constraint::{Length, Min};
use ratatui::layout::Layout;

use crate::core::state::Session;
use crate::tui::component::Component;
use crate::tui::components::{
    Landing, MessageList, ModelPicker, ParamPanel, TemplatePicker, TitleBar,
};
use crate::tui::{Overlay, TuiState};

/// Display name for the active model: the catalog entry's name once loaded,
/// the raw id if it was configured before the catalog settled, None otherwise.
fn active_model_name(session: &Session) -> Option<String> {
    session
        .active_model()
        .map(|m| m.name.clone())
        .or_else(|| {
            (!session.active_model_id.is_empty()).then(|| session.active_model_id.clone())
        })
}

pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &mut TuiState, spinner_frame: usize) {
    let input_height = tui.input_box.calculate_height();
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar {
        sequence_number: session.sequence_number,
        model_name: active_model_name(session),
        message_count: session.messages.len(),
        status_message: session.status_message.clone(),
        theme: tui.theme,
    };
    title_bar.render(frame, title_area);

    if session.messages.is_empty() && !session.is_loading {
        let mut landing = Landing {
            model_name: active_model_name(session),
            theme: tui.theme,
        };
        landing.render(frame, main_area);
    } else {
        let mut list = MessageList {
            messages: &session.messages,
            is_loading: session.is_loading,
            spinner_frame,
            theme: tui.theme,
            state: &mut tui.message_list,
        };
        list.render(frame, main_area);
    }

    tui.input_box.theme = tui.theme;
    tui.input_box.render(frame, input_area);

    // Overlays draw over the whole frame.
    match &mut tui.overlay {
        Overlay::None => {}
        Overlay::ModelPicker(state) => {
            let mut picker = ModelPicker {
                state,
                active_model_id: &session.active_model_id,
                loading: session.models_loading,
                theme: tui.theme,
            };
            picker.render(frame, frame.area());
        }
        Overlay::TemplatePicker(state) => {
            let mut picker = TemplatePicker {
                state,
                theme: tui.theme,
            };
            picker.render(frame, frame.area());
        }
        Overlay::ParamPanel(state) => {
            let mut panel = ParamPanel {
                state,
                parameters: session.parameters,
                theme: tui.theme,
            };
            panel.render(frame, frame.area());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::config::ThemeKind;
    use crate::test_support::loaded_session;
    use crate::tui::components::ModelPickerState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(session: &Session, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, session, tui, 0))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_empty_session_shows_landing() {
        let session = loaded_session();
        let mut tui = TuiState::new(ThemeKind::Dark);
        let text = draw(&session, &mut tui);
        assert!(text.contains("Ready to chat!"));
        assert!(text.contains("GPT-4"));
        assert!(text.contains("Conversation #1"));
    }

    #[test]
    fn test_conversation_shows_messages() {
        let mut session = loaded_session();
        update(&mut session, Action::SubmitPrompt("hello there".to_string()));
        let mut tui = TuiState::new(ThemeKind::Dark);
        let text = draw(&session, &mut tui);
        assert!(text.contains("hello there"));
        assert!(text.contains("AI is thinking..."));
        assert!(!text.contains("Ready to chat!"));
    }

    #[test]
    fn test_model_picker_overlay_draws_catalog() {
        let session = loaded_session();
        let mut tui = TuiState::new(ThemeKind::Dark);
        tui.overlay = Overlay::ModelPicker(ModelPickerState::new(session.models.clone()));
        let text = draw(&session, &mut tui);
        assert!(text.contains("Models"));
        assert!(text.contains("Claude 3 Sonnet"));
    }
}

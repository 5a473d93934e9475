//! # TitleBar Component
//!
//! Top status line: conversation number, active model, message count, and
//! any transient status text. Purely presentational — all fields are props
//! from the session, so it renders exactly what it is given.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct TitleBar {
    pub sequence_number: u32,
    /// Display name of the active model, or None before the catalog loads.
    pub model_name: Option<String>,
    pub message_count: usize,
    pub status_message: String,
    pub theme: Theme,
}

impl TitleBar {
    fn text(&self) -> String {
        let model = self.model_name.as_deref().unwrap_or("no model");
        let mut text = format!(
            "Parley · Conversation #{} · {}",
            self.sequence_number, model
        );
        if self.message_count > 0 {
            text.push_str(&format!(" · {} messages", self.message_count));
        }
        if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), self.theme.accent_style()));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ThemeKind;

    fn bar(model: Option<&str>, count: usize, status: &str) -> TitleBar {
        TitleBar {
            sequence_number: 3,
            model_name: model.map(|m| m.to_string()),
            message_count: count,
            status_message: status.to_string(),
            theme: Theme::new(ThemeKind::Dark),
        }
    }

    #[test]
    fn test_shows_conversation_and_model() {
        let text = bar(Some("GPT-4"), 0, "").text();
        assert_eq!(text, "Parley · Conversation #3 · GPT-4");
    }

    #[test]
    fn test_message_count_and_status_are_appended() {
        let text = bar(Some("GPT-4"), 4, "Template: Code Reviewer").text();
        assert!(text.contains("4 messages"));
        assert!(text.contains("| Template: Code Reviewer"));
    }

    #[test]
    fn test_placeholder_before_catalog_loads() {
        let text = bar(None, 0, "").text();
        assert!(text.contains("no model"));
    }
}

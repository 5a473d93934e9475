//! # Landing Component
//!
//! Shown in place of the message list while the conversation is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct Landing {
    /// Display name of the active model, or None before the catalog loads.
    pub model_name: Option<String>,
    pub theme: Theme,
}

impl Component for Landing {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let headline = Span::styled(
            "Ready to chat!",
            self.theme.accent_style().add_modifier(Modifier::BOLD),
        );
        let hint = match &self.model_name {
            Some(name) => format!("Send a message to {name} using the prompt editor below"),
            None => String::from("Waiting for the model catalog..."),
        };

        let lines = vec![
            Line::from(headline),
            Line::default(),
            Line::from(Span::styled(hint, self.theme.dim_style())),
            Line::default(),
            Line::from(Span::styled(
                "Ctrl+M models · Ctrl+T templates · Ctrl+P parameters · Ctrl+N new chat",
                self.theme.dim_style(),
            )),
            Line::from(Span::styled(
                format!("parley v{}", env!("CARGO_PKG_VERSION")),
                self.theme.dim_style(),
            )),
        ];

        let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, center);
    }
}

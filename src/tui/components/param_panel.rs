//! # Parameter Panel Component
//!
//! Overlay for adjusting generation parameters. Opened with Ctrl+P.
//! Up/Down pick a field, Left/Right nudge it (clamped in core), Esc closes.
//! Adjustments apply immediately to the session; past messages are never
//! affected.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::state::{GenerationParameters, ParamField};
use crate::tui::components::model_picker::centered_rect;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

const FIELDS: [ParamField; 3] = [
    ParamField::Temperature,
    ParamField::MaxTokens,
    ParamField::TopP,
];

/// Persistent state for the parameter panel overlay.
pub struct ParamPanelState {
    pub selected: usize,
}

impl ParamPanelState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ParamPanelEvent> {
        match event {
            TuiEvent::Escape => Some(ParamPanelEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(FIELDS.len() - 1);
                None
            }
            TuiEvent::CursorLeft => Some(ParamPanelEvent::Adjust {
                field: FIELDS[self.selected],
                increase: false,
            }),
            TuiEvent::CursorRight => Some(ParamPanelEvent::Adjust {
                field: FIELDS[self.selected],
                increase: true,
            }),
            _ => None,
        }
    }
}

impl Default for ParamPanelState {
    fn default() -> Self {
        Self::new()
    }
}

pub enum ParamPanelEvent {
    Adjust { field: ParamField, increase: bool },
    Dismiss,
}

/// Transient render wrapper for the parameter panel.
pub struct ParamPanel<'a> {
    pub state: &'a ParamPanelState,
    pub parameters: GenerationParameters,
    pub theme: Theme,
}

impl ParamPanel<'_> {
    /// Proportional fill bar, slider style.
    fn bar(fraction: f32, width: usize) -> String {
        let filled = ((fraction.clamp(0.0, 1.0)) * width as f32).round() as usize;
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }

    fn row(&self, index: usize, label: &str, value: String, fraction: f32) -> Line<'static> {
        let style = if index == self.state.selected {
            self.theme
                .text_style()
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            self.theme.text_style()
        };
        Line::from(vec![
            Span::styled(format!(" {label:<12}"), style),
            Span::styled(Self::bar(fraction, 20), self.theme.accent_style()),
            Span::styled(format!("  {value:>6} "), style),
        ])
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 30, area);
        frame.render_widget(Clear, overlay);

        let p = self.parameters;
        let lines = vec![
            Line::default(),
            self.row(0, "Temperature", format!("{:.1}", p.temperature), p.temperature / 2.0),
            Line::default(),
            self.row(1, "Max Tokens", p.max_tokens.to_string(), p.max_tokens as f32 / 4000.0),
            Line::default(),
            self.row(2, "Top P", format!("{:.2}", p.top_p), p.top_p),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dim_style())
            .title(" Parameters ")
            .title_style(self.theme.accent_style())
            .title_bottom(Line::from(" ←/→ Adjust  ↑/↓ Field  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let panel = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(block);
        frame.render_widget(panel, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_right_emit_adjustments_for_selected_field() {
        let mut state = ParamPanelState::new();
        state.handle_event(&TuiEvent::CursorDown);

        match state.handle_event(&TuiEvent::CursorRight) {
            Some(ParamPanelEvent::Adjust { field, increase }) => {
                assert_eq!(field, ParamField::MaxTokens);
                assert!(increase);
            }
            _ => panic!("Expected Adjust"),
        }

        match state.handle_event(&TuiEvent::CursorLeft) {
            Some(ParamPanelEvent::Adjust { field, increase }) => {
                assert_eq!(field, ParamField::MaxTokens);
                assert!(!increase);
            }
            _ => panic!("Expected Adjust"),
        }
    }

    #[test]
    fn test_field_selection_clamps() {
        let mut state = ParamPanelState::new();
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, FIELDS.len() - 1);
    }

    #[test]
    fn test_bar_proportions() {
        assert_eq!(ParamPanel::bar(0.0, 4), "░░░░");
        assert_eq!(ParamPanel::bar(1.0, 4), "████");
        assert_eq!(ParamPanel::bar(0.5, 4), "██░░");
    }
}

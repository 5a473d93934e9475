//! # Model Picker Component
//!
//! Full-screen overlay for choosing the active model. Opened with Ctrl+M.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ModelPickerState` lives in the shell's overlay slot
//! - `ModelPicker` is created each frame with borrowed state
//!
//! The picker holds no opinion about whether the chosen id differs from the
//! active one; that decision belongs to the session state machine.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::catalog::ModelDescriptor;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Persistent state for the model picker overlay.
pub struct ModelPickerState {
    pub models: Vec<ModelDescriptor>,
    pub selected: usize,
    pub list_state: ListState,
}

impl ModelPickerState {
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        let mut list_state = ListState::default();
        if !models.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            models,
            selected: 0,
            list_state,
        }
    }

    /// Handle a key event, returning a ModelPickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ModelPickerEvent> {
        match event {
            TuiEvent::Escape => Some(ModelPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.models.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.models.is_empty() {
                    self.selected = (self.selected + 1).min(self.models.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar('\n') => self
                .models
                .get(self.selected)
                .map(|model| ModelPickerEvent::Select(model.id.clone())),
            _ => None,
        }
    }
}

/// Events emitted by the model picker.
pub enum ModelPickerEvent {
    Select(String),
    Dismiss,
}

/// Transient render wrapper for the model picker overlay.
pub struct ModelPicker<'a> {
    pub state: &'a mut ModelPickerState,
    pub active_model_id: &'a str,
    /// Catalog fetch still pending: selection is impossible.
    pub loading: bool,
    pub theme: Theme,
}

impl ModelPicker<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dim_style())
            .title(" Models ")
            .title_style(self.theme.accent_style())
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.loading {
            let pending = Paragraph::new("Loading models...")
                .style(self.theme.dim_style())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(pending, overlay);
            return;
        }

        if self.state.models.is_empty() {
            let empty = Paragraph::new("Model catalog unavailable.")
                .style(self.theme.dim_style())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .models
            .iter()
            .enumerate()
            .map(|(i, model)| {
                let is_active = model.id == self.active_model_id;
                let style = if i == self.state.selected {
                    self.theme
                        .text_style()
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(self.theme.accent)
                } else {
                    self.theme.text_style()
                };

                let mut spans = vec![
                    Span::styled(format!("[{}]", model.provider), style),
                    Span::styled(format!("  {}", model.name), style),
                    Span::styled(
                        format!("  {}", model.description),
                        if i == self.state.selected {
                            style
                        } else {
                            self.theme.dim_style()
                        },
                    ),
                ];
                if is_active {
                    spans.push(Span::styled(" *", style));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

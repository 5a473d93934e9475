//! # Template Picker Component
//!
//! Overlay listing the prompt template catalog. Opened with Ctrl+T.
//! Choosing an entry replaces the whole draft with the template's prompt
//! text (no confirmation) and applies its parameter preset to the session.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::catalog::PromptTemplate;
use crate::tui::components::model_picker::centered_rect;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Persistent state for the template picker overlay.
pub struct TemplatePickerState {
    pub templates: Vec<PromptTemplate>,
    pub selected: usize,
    pub list_state: ListState,
}

impl TemplatePickerState {
    pub fn new(templates: Vec<PromptTemplate>) -> Self {
        let mut list_state = ListState::default();
        if !templates.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            templates,
            selected: 0,
            list_state,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<TemplatePickerEvent> {
        match event {
            TuiEvent::Escape => Some(TemplatePickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.templates.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.templates.is_empty() {
                    self.selected = (self.selected + 1).min(self.templates.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar('\n') => self
                .templates
                .get(self.selected)
                .map(|t| TemplatePickerEvent::Select(t.clone())),
            _ => None,
        }
    }
}

pub enum TemplatePickerEvent {
    Select(PromptTemplate),
    Dismiss,
}

/// Transient render wrapper for the template picker overlay.
pub struct TemplatePicker<'a> {
    pub state: &'a mut TemplatePickerState,
    pub theme: Theme,
}

impl TemplatePicker<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dim_style())
            .title(" Templates ")
            .title_style(self.theme.accent_style())
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Load  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.state.templates.is_empty() {
            // Either the catalog fetch failed or it has not settled yet;
            // editing continues without templates either way.
            let empty = Paragraph::new("No templates available.")
                .style(self.theme.dim_style())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .templates
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let style = if i == self.state.selected {
                    self.theme
                        .text_style()
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    self.theme.text_style()
                };
                let detail_style = if i == self.state.selected {
                    style
                } else {
                    self.theme.dim_style()
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{}]", template.category), style),
                    Span::styled(format!("  {}", template.name), style),
                    Span::styled(format!("  {}", template.description), detail_style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

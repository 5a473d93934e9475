//! # MessageList Component
//!
//! Scrollable view of the conversation history.
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll state) and the message
//! slice (props). Heights are measured per message each frame so the
//! scroll view always matches the rendered layout.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Modifier;
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::{Message, Role};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Scroll state for the message list. Must persist in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content.
    pub stick_to_bottom: bool,
    /// Last known viewport height, for page-sized scrolling.
    pub viewport_height: u16,
    /// Total content height measured during the last render.
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn scroll_by(&mut self, delta: i32) {
        let current = self.scroll_state.offset().y as i32;
        let next = (current + delta).clamp(0, self.max_scroll() as i32) as u16;
        self.scroll_state.set_offset(Position { x: 0, y: next });
        // Scrolling away releases the pin; reaching the bottom re-pins.
        self.stick_to_bottom = next >= self.max_scroll();
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-(self.viewport_height as i32)),
            TuiEvent::ScrollPageDown => self.scroll_by(self.viewport_height as i32),
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state
                    .set_offset(Position { x: 0, y: self.max_scroll() });
            }
            _ => return None,
        }
        Some(())
    }
}

/// Transient render wrapper for the conversation history.
pub struct MessageList<'a> {
    pub messages: &'a [Message],
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub theme: Theme,
    pub state: &'a mut MessageListState,
}

impl<'a> MessageList<'a> {
    fn message_paragraph(&self, message: &'a Message) -> Paragraph<'a> {
        let (label, style) = match message.role {
            Role::User => ("you".to_string(), self.theme.user_style()),
            Role::Assistant => (
                message
                    .model_id
                    .clone()
                    .unwrap_or_else(|| "assistant".to_string()),
                self.theme.assistant_style(),
            ),
        };
        let title = format!(" {} · {} ", label, message.created_at.format("%H:%M:%S"));

        Paragraph::new(message.content.as_str())
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(style.add_modifier(Modifier::DIM))
                    .title_style(style),
            )
            .style(self.theme.text_style())
            .wrap(Wrap { trim: false })
    }

    fn thinking_paragraph(&self) -> Paragraph<'a> {
        let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        Paragraph::new(format!("{spinner} AI is thinking..."))
            .block(
                Block::bordered()
                    .border_style(self.theme.dim_style().add_modifier(Modifier::DIM)),
            )
            .style(self.theme.dim_style())
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // room for the scrollbar
        let inner_width = content_width.saturating_sub(2);

        let mut blocks: Vec<(Paragraph, u16)> = self
            .messages
            .iter()
            .map(|m| {
                let p = self.message_paragraph(m);
                let h = p.line_count(inner_width) as u16;
                (p, h)
            })
            .collect();
        if self.is_loading {
            let p = self.thinking_paragraph();
            let h = p.line_count(inner_width) as u16;
            blocks.push((p, h));
        }

        let total_height: u16 = blocks.iter().map(|(_, h)| h).sum();
        self.state.viewport_height = area.height;
        self.state.content_height = total_height;

        if self.state.stick_to_bottom {
            self.state.scroll_state.set_offset(Position {
                x: 0,
                y: self.state.max_scroll(),
            });
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0u16;
        for (paragraph, height) in blocks {
            scroll_view.render_widget(paragraph, Rect::new(0, y, content_width, height));
            y += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

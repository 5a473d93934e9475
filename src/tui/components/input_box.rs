//! # InputBox Component
//!
//! The prompt editor: a multi-line draft buffer with cursor editing.
//!
//! ## Responsibilities
//!
//! - Capture text input (plain Enter inserts a newline)
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit submission on the Ctrl+Enter chord
//! - Accept template text loaded over the current draft
//!
//! Long lines are not soft-wrapped; the view scrolls horizontally and
//! vertically to keep the cursor visible, which keeps cursor math exact.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Tallest the editor grows before scrolling internally.
const MAX_VISIBLE_LINES: u16 = 6;

/// High-level events emitted by the InputBox.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the draft (Ctrl+Enter). Carries the full text.
    Submit(String),
    /// Draft content or cursor changed.
    ContentChanged,
}

pub struct InputBox {
    /// The draft text.
    pub buffer: String,
    /// Byte offset of the cursor within `buffer`.
    cursor: usize,
    /// First visible logical line.
    scroll_row: u16,
    /// Horizontal display-width offset applied to all lines.
    scroll_col: u16,
    /// Theme prop, synced by the shell each frame.
    pub theme: Theme,
}

impl InputBox {
    pub fn new(theme: Theme) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_row: 0,
            scroll_col: 0,
            theme,
        }
    }

    /// Replace the entire draft (template loading). The previous draft is
    /// discarded without confirmation; the cursor lands at the end.
    pub fn load_draft(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.buffer.len();
        self.scroll_row = 0;
        self.scroll_col = 0;
    }

    /// Discard the draft.
    pub fn clear(&mut self) {
        self.load_draft(String::new());
    }

    /// Required height (content lines clamped, plus borders).
    pub fn calculate_height(&self) -> u16 {
        let lines = self.buffer.split('\n').count() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + 2
    }

    /// Cursor position as (logical line, display column).
    fn cursor_line_col(&self) -> (u16, u16) {
        let before = &self.buffer[..self.cursor];
        let line = before.matches('\n').count() as u16;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col: usize = self.buffer[line_start..self.cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum();
        (line, col as u16)
    }

    /// Byte range of the logical line containing `pos`.
    fn line_bounds(&self, pos: usize) -> (usize, usize) {
        let start = self.buffer[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = self.buffer[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.buffer.len());
        (start, end)
    }

    /// Move the cursor one logical line up or down, staying as close as
    /// possible to the current display column.
    fn move_vertical(&mut self, down: bool) -> bool {
        let (start, end) = self.line_bounds(self.cursor);
        let target_start = if down {
            if end >= self.buffer.len() {
                return false;
            }
            end + 1
        } else {
            if start == 0 {
                return false;
            }
            self.buffer[..start - 1]
                .rfind('\n')
                .map(|i| i + 1)
                .unwrap_or(0)
        };

        let desired = self.cursor_col_width(start);

        let (t_start, t_end) = self.line_bounds(target_start);
        let mut pos = t_start;
        let mut width = 0usize;
        for c in self.buffer[t_start..t_end].chars() {
            let w = c.width().unwrap_or(0);
            if width + w > desired {
                break;
            }
            width += w;
            pos += c.len_utf8();
        }
        self.cursor = pos;
        true
    }

    fn cursor_col_width(&self, line_start: usize) -> usize {
        self.buffer[line_start..self.cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    fn prev_char_boundary(&self, pos: usize) -> usize {
        self.buffer[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self, pos: usize) -> usize {
        self.buffer[pos..]
            .chars()
            .next()
            .map(|c| pos + c.len_utf8())
            .unwrap_or(pos)
    }

    /// Keep the cursor inside the viewport by adjusting both scroll axes.
    fn follow_cursor(&mut self, inner_width: u16, inner_height: u16) {
        let (row, col) = self.cursor_line_col();
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if inner_height > 0 && row >= self.scroll_row + inner_height {
            self.scroll_row = row + 1 - inner_height;
        }
        if col < self.scroll_col {
            self.scroll_col = col;
        } else if inner_width > 0 && col >= self.scroll_col + inner_width {
            self.scroll_col = col + 1 - inner_width;
        }
    }

    /// Clip a line to the visible horizontal window by display width.
    fn clip_line(line: &str, skip: u16, take: u16) -> String {
        let mut out = String::new();
        let mut width = 0u16;
        for c in line.chars() {
            let w = c.width().unwrap_or(0) as u16;
            if width + w <= skip {
                width += w;
                continue;
            }
            if width + w > skip + take {
                break;
            }
            width += w;
            out.push(c);
        }
        out
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2);
        self.follow_cursor(inner_width, inner_height);

        let counter = format!(" {} chars · Ctrl+Enter send ", self.buffer.chars().count());
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.theme.dim_style())
            .title(" Prompt ")
            .title_style(self.theme.accent_style())
            .title_bottom(Line::from(counter).right_aligned().style(self.theme.dim_style()));

        let visible: Vec<Line> = self
            .buffer
            .split('\n')
            .skip(self.scroll_row as usize)
            .take(inner_height as usize)
            .map(|l| Line::from(Self::clip_line(l, self.scroll_col, inner_width)))
            .collect();

        let paragraph = Paragraph::new(visible)
            .block(block)
            .style(self.theme.text_style());
        frame.render_widget(paragraph, area);

        let (row, col) = self.cursor_line_col();
        frame.set_cursor_position((
            area.x + 1 + col.saturating_sub(self.scroll_col),
            area.y + 1 + row.saturating_sub(self.scroll_row),
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_char_boundary(self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_char_boundary(self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_char_boundary(self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_char_boundary(self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorUp => self
                .move_vertical(false)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .move_vertical(true)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorHome => {
                let (start, _) = self.line_bounds(self.cursor);
                (self.cursor != start).then(|| {
                    self.cursor = start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let (_, end) = self.line_bounds(self.cursor);
                (self.cursor != end).then(|| {
                    self.cursor = end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    None
                } else {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor = 0;
                    self.scroll_row = 0;
                    self.scroll_col = 0;
                    Some(InputEvent::Submit(text))
                }
            }
            _ => None,
        }
    }
}

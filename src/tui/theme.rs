//! # Theme
//!
//! Explicit color context for the whole UI. Built once at startup from the
//! resolved config and passed down through every render call; toggled at
//! runtime with Ctrl+G. There is no global theme state.

use ratatui::style::{Color, Modifier, Style};

use crate::core::config::ThemeKind;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub kind: ThemeKind,
    /// Default body text.
    pub text: Color,
    /// De-emphasized text (hints, timestamps, borders of inactive panes).
    pub dim: Color,
    /// Highlight color for titles and the active model.
    pub accent: Color,
    pub user: Color,
    pub assistant: Color,
}

impl Theme {
    pub fn new(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self {
                kind,
                text: Color::White,
                dim: Color::DarkGray,
                accent: Color::Cyan,
                user: Color::Cyan,
                assistant: Color::Green,
            },
            ThemeKind::Light => Self {
                kind,
                text: Color::Black,
                dim: Color::Gray,
                accent: Color::Blue,
                user: Color::Blue,
                assistant: Color::Magenta,
            },
        }
    }

    pub fn toggle(&mut self) {
        *self = Theme::new(self.kind.toggled());
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn user_style(&self) -> Style {
        Style::default().fg(self.user)
    }

    pub fn assistant_style(&self) -> Style {
        Style::default().fg(self.assistant)
    }
}
